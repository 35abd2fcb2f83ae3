use crate::core::DerivedFinancials;
use anyhow::{Context, Result};

/// Serializes the full derived plan as pretty-printed JSON.
pub fn render(plan: &DerivedFinancials) -> Result<String> {
    serde_json::to_string_pretty(plan).context("Failed to serialize derived plan")
}
