//! Product mix allocation of the revenue goal.

use crate::core::params::Product;
use serde::{Deserialize, Serialize};

/// Mix totals further than this from 100% raise a warning.
pub const MIX_TOLERANCE_PCT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAllocation {
    pub name: String,
    pub revenue_value: f64,
    pub mix_pct: f64,
    pub project_count: f64,
    pub display_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub allocations: Vec<ProductAllocation>,
    pub project_count: f64,
    /// Blended revenue per project, 0 when nothing counts projects.
    pub avg_sale_value: f64,
    pub mix_total_pct: f64,
}

impl ProductSummary {
    pub fn mix_is_balanced(&self) -> bool {
        (self.mix_total_pct - 100.0).abs() <= MIX_TOLERANCE_PCT
    }
}

/// Projects implied by `revenue_value` at `avg_sale_value` per project.
///
/// An average sale of 1 or less marks a line with no per-unit price, which
/// never contributes projects.
pub fn project_count(revenue_value: f64, avg_sale_value: f64) -> f64 {
    if avg_sale_value > 1.0 {
        revenue_value / avg_sale_value
    } else {
        0.0
    }
}

/// Splits `revenue_goal` across products by mix, preserving input order.
///
/// Mix percentages are used as given even when they do not total 100.
pub fn allocate_products(products: &[Product], revenue_goal: f64) -> ProductSummary {
    let allocations: Vec<ProductAllocation> = products
        .iter()
        .map(|product| {
            let revenue_value = revenue_goal * product.mix_pct / 100.0;
            ProductAllocation {
                name: product.name.clone(),
                revenue_value,
                mix_pct: product.mix_pct,
                project_count: project_count(revenue_value, product.avg_sale_value),
                display_color: product.display_color.clone(),
            }
        })
        .collect();

    let project_count: f64 = allocations.iter().map(|a| a.project_count).sum();
    let avg_sale_value = if project_count > 0.0 {
        revenue_goal / project_count
    } else {
        0.0
    };

    ProductSummary {
        allocations,
        project_count,
        avg_sale_value,
        mix_total_pct: products.iter().map(|p| p.mix_pct).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, mix_pct: f64, avg_sale_value: f64) -> Product {
        Product {
            name: name.to_string(),
            mix_pct,
            avg_sale_value,
            display_color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_allocation_and_blended_average() {
        let products = vec![product("Wood", 60.0, 15000.0), product("Vinyl", 40.0, 8000.0)];
        let summary = allocate_products(&products, 1000000.0);

        assert_eq!(summary.allocations[0].name, "Wood");
        assert_eq!(summary.allocations[0].revenue_value, 600000.0);
        assert_eq!(summary.allocations[0].project_count, 40.0);
        assert_eq!(summary.allocations[1].revenue_value, 400000.0);
        assert_eq!(summary.allocations[1].project_count, 50.0);
        assert_eq!(summary.project_count, 90.0);
        assert!((summary.avg_sale_value - 1000000.0 / 90.0).abs() < 1e-9);
        assert!(summary.mix_is_balanced());
    }

    #[test]
    fn test_unpriced_line_counts_no_projects() {
        for mix_pct in [0.0, 1.25, 50.0, 100.0] {
            let summary = allocate_products(&[product("Service", mix_pct, 1.0)], 500000.0);
            assert_eq!(summary.allocations[0].project_count, 0.0);
            assert_eq!(summary.project_count, 0.0);
            assert_eq!(summary.avg_sale_value, 0.0);
        }
        assert_eq!(project_count(1000.0, 0.5), 0.0);
        assert_eq!(project_count(1000.0, 0.0), 0.0);
    }

    #[test]
    fn test_unbalanced_mix_still_allocates() {
        let products = vec![product("Wood", 50.0, 10000.0), product("Steel", 30.0, 10000.0)];
        let summary = allocate_products(&products, 100000.0);

        assert_eq!(summary.mix_total_pct, 80.0);
        assert!(!summary.mix_is_balanced());
        assert_eq!(summary.allocations[1].revenue_value, 30000.0);
    }

    #[test]
    fn test_mix_within_tolerance() {
        let products = vec![product("Wood", 99.95, 10000.0)];
        assert!(allocate_products(&products, 1.0).mix_is_balanced());
    }
}
