//! Budget derivation engine and its supporting plumbing

pub mod cache;
pub mod comparison;
pub mod config;
pub mod costs;
pub mod engine;
pub mod error;
pub mod log;
pub mod monthly;
pub mod normalize;
pub mod overhead;
pub mod params;
pub mod products;

// Re-export main types for cleaner imports
pub use cache::DerivationCache;
pub use engine::{DerivedFinancials, compute};
pub use error::{BudgetError, ValidationWarning};
pub use params::BudgetParameters;
