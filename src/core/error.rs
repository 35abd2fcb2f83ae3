//! Error and warning types produced by the budget engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors produced while deriving a budget plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BudgetError {
    /// A parameter is outside the domain the derivation is defined on.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },
}

impl BudgetError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BudgetError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Advisory signals attached to a successful derivation. They never block it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Product mix percentages do not add up to roughly 100%.
    ProductMixTotal { total_pct: f64 },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::ProductMixTotal { total_pct } => {
                write!(f, "Product mix totals {total_pct:.1}% (should be ~99-100%)")
            }
        }
    }
}
