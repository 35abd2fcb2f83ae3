use crate::core::error::BudgetError;

/// Scales raw period weights into a distribution that sums to 1.
///
/// Weights need not sum to anything in particular, but each must be a finite,
/// non-negative number and at least one must be positive.
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>, BudgetError> {
    for (i, weight) in weights.iter().enumerate() {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(BudgetError::invalid(
                format!("month_weights[{i}]"),
                format!("must be a finite non-negative number, got {weight}"),
            ));
        }
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(BudgetError::invalid(
            "month_weights",
            "at least one weight must be positive",
        ));
    }

    Ok(weights.iter().map(|weight| weight / total).collect())
}
