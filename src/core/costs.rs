//! Cost aggregation, revenue goal-seek, and four-bucket decomposition.

use crate::core::error::BudgetError;
use crate::core::params::BudgetParameters;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scalar cost totals summed from line items and the crew roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostTotals {
    pub direct_labor: f64,
    pub payroll_taxes: f64,
    pub total_overhead: f64,
}

/// Labor, materials, margin and profit split of a solved revenue goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDecomposition {
    pub commission: f64,
    pub total_cogs_labor: f64,
    pub labor_pct: f64,
    pub net_profit_pct: f64,
    pub net_profit_dollars: f64,
    pub materials_dollars: f64,
    /// Labor, materials, job supplies and non-direct labor as % of revenue.
    pub cogs_pct: f64,
    pub cogs_total: f64,
    pub gross_margin_pct: f64,
    pub gross_margin_dollars: f64,
}

pub fn aggregate_costs(params: &BudgetParameters) -> CostTotals {
    let direct_labor = params
        .crew_members
        .iter()
        .map(|member| member.annual_compensation)
        .sum::<f64>()
        + params.shop_manager.annual_compensation;
    let payroll_taxes = direct_labor * params.overhead_line_items.payroll_tax_rate_pct / 100.0;
    let total_overhead = params.overhead_line_items.total() + payroll_taxes;

    CostTotals {
        direct_labor,
        payroll_taxes,
        total_overhead,
    }
}

/// Back-solves the revenue at which `total_overhead` is exactly
/// `overhead_pct` percent of revenue. Both inputs must be positive.
pub fn solve_revenue_goal(total_overhead: f64, overhead_pct: f64) -> Result<f64, BudgetError> {
    if !overhead_pct.is_finite() || overhead_pct <= 0.0 {
        return Err(BudgetError::invalid(
            "overhead_pct",
            format!("must be greater than zero to solve a revenue goal, got {overhead_pct}"),
        ));
    }
    if !total_overhead.is_finite() || total_overhead <= 0.0 {
        return Err(BudgetError::invalid(
            "overhead_line_items",
            format!("total overhead must be positive to solve a revenue goal, got {total_overhead}"),
        ));
    }
    let revenue_goal = total_overhead / (overhead_pct / 100.0);
    if !revenue_goal.is_finite() {
        return Err(BudgetError::invalid(
            "revenue_goal",
            format!(
                "overhead of {total_overhead} at {overhead_pct}% does not yield a finite revenue goal"
            ),
        ));
    }
    debug!(total_overhead, overhead_pct, revenue_goal, "Solved revenue goal");
    Ok(revenue_goal)
}

/// Splits `revenue_goal` into the four buckets and gross margin.
///
/// Net profit may come out negative; a planned loss is a valid result.
/// `revenue_goal` must be positive.
pub fn decompose_costs(
    params: &BudgetParameters,
    revenue_goal: f64,
    direct_labor: f64,
) -> CostDecomposition {
    let commission = revenue_goal * params.commission_pct / 100.0;
    let total_cogs_labor = direct_labor + commission;
    let labor_pct = total_cogs_labor / revenue_goal * 100.0;
    let net_profit_pct = 100.0 - params.overhead_pct - labor_pct - params.materials_pct;
    let cogs_pct =
        labor_pct + params.materials_pct + params.job_supplies_pct + params.non_direct_labor_pct;
    let gross_margin_pct = 100.0
        - labor_pct
        - params.materials_pct
        - params.job_supplies_pct
        - params.non_direct_labor_pct;
    let cogs_total = revenue_goal * cogs_pct / 100.0;

    CostDecomposition {
        commission,
        total_cogs_labor,
        labor_pct,
        net_profit_pct,
        net_profit_dollars: revenue_goal * net_profit_pct / 100.0,
        materials_dollars: revenue_goal * params.materials_pct / 100.0,
        cogs_pct,
        cogs_total,
        gross_margin_pct,
        gross_margin_dollars: revenue_goal - cogs_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{CrewMember, OverheadItem, OverheadLineItems, PERIODS};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-6 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    /// Overhead of 150k, direct labor of 200k, no payroll tax.
    fn flat_params() -> BudgetParameters {
        let mut params = BudgetParameters::with_defaults();
        params.overhead_line_items = OverheadLineItems {
            items: vec![OverheadItem {
                name: "Rent".to_string(),
                amount: 150000.0,
                minor: false,
            }],
            payroll_tax_rate_pct: 0.0,
        };
        params.crew_members = vec![CrewMember {
            name: "Installer".to_string(),
            annual_compensation: 160000.0,
            active_months: [true; PERIODS],
        }];
        params.shop_manager.annual_compensation = 40000.0;
        params.overhead_pct = 30.0;
        params.commission_pct = 5.0;
        params.materials_pct = 30.0;
        params
    }

    #[test]
    fn test_aggregate_default_costs() {
        let totals = aggregate_costs(&BudgetParameters::with_defaults());
        assert_eq!(totals.direct_labor, 266000.0);
        assert_close(totals.payroll_taxes, 34580.0);
        assert_close(totals.total_overhead, 673680.0);
    }

    #[test]
    fn test_scenario_goal_seek_and_loss() {
        let params = flat_params();
        let totals = aggregate_costs(&params);
        assert_eq!(totals.total_overhead, 150000.0);
        assert_eq!(totals.direct_labor, 200000.0);

        let revenue_goal = solve_revenue_goal(totals.total_overhead, params.overhead_pct).unwrap();
        assert_close(revenue_goal, 500000.0);

        let costs = decompose_costs(&params, revenue_goal, totals.direct_labor);
        assert_close(costs.commission, 25000.0);
        assert_close(costs.total_cogs_labor, 225000.0);
        assert_close(costs.labor_pct, 45.0);
        assert_close(costs.net_profit_pct, -5.0);
        assert_close(costs.net_profit_dollars, -25000.0);
        assert_close(costs.materials_dollars, 150000.0);
    }

    #[test]
    fn test_gross_margin_includes_supplies() {
        let mut params = flat_params();
        params.job_supplies_pct = 2.5;
        params.non_direct_labor_pct = 2.0;

        let costs = decompose_costs(&params, 500000.0, 200000.0);
        assert_close(costs.cogs_pct, 79.5);
        assert_close(costs.gross_margin_pct, 20.5);
        assert_close(costs.cogs_total, 397500.0);
        assert_close(costs.gross_margin_dollars, 102500.0);
    }

    #[test]
    fn test_non_positive_overhead_ratio_rejected() {
        assert!(solve_revenue_goal(150000.0, 0.0).is_err());
        assert!(solve_revenue_goal(150000.0, -5.0).is_err());
        assert!(solve_revenue_goal(150000.0, f64::NAN).is_err());
    }

    #[test]
    fn test_overflowing_revenue_goal_rejected() {
        let tiny_ratio = solve_revenue_goal(673680.0, 1e-310).unwrap_err();
        let huge_overhead = solve_revenue_goal(1e308, 32.0).unwrap_err();
        for err in [tiny_ratio, huge_overhead] {
            match err {
                BudgetError::InvalidParameter { field, .. } => assert_eq!(field, "revenue_goal"),
            }
        }
    }

    #[test]
    fn test_zero_total_overhead_rejected() {
        let err = solve_revenue_goal(0.0, 30.0).unwrap_err();
        assert!(err.to_string().contains("overhead_line_items"));
    }
}
