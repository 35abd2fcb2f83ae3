//! Terminal views over a derived plan. No financial logic lives here.

pub mod crew;
pub mod export;
pub mod monthly;
pub mod overhead;
pub mod products;
pub mod setup;
pub mod summary;
pub mod ui;
