//! Derivation of a full financial plan from a parameter snapshot.
//!
//! [`compute`] is a pure function: it validates the whole snapshot up front and
//! either returns a complete [`DerivedFinancials`] or an error, never a partial
//! result. It does no I/O and holds no state between calls.

use crate::core::comparison::{Comparison, CurrentPeriod, compare};
use crate::core::costs::{aggregate_costs, decompose_costs, solve_revenue_goal};
use crate::core::error::{BudgetError, ValidationWarning};
use crate::core::monthly::{
    AllocationInputs, MonthlyRecord, QuarterlyRollup, accumulate_net_profit, allocate_monthly,
    quarterly_rollup,
};
use crate::core::normalize::normalize_weights;
use crate::core::overhead::{OverheadRank, rank_overhead};
use crate::core::params::BudgetParameters;
use crate::core::products::{ProductAllocation, allocate_products};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything derived from one `BudgetParameters` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFinancials {
    pub total_overhead: f64,
    pub revenue_goal: f64,
    pub direct_labor: f64,
    pub payroll_taxes: f64,
    pub commission: f64,
    pub total_cogs_labor: f64,
    pub labor_pct: f64,
    pub net_profit_pct: f64,
    pub net_profit_dollars: f64,
    pub materials_dollars: f64,
    pub gross_margin_pct: f64,
    pub gross_margin_dollars: f64,
    pub cogs_total: f64,
    pub project_count: f64,
    pub avg_sale_value: f64,
    pub debt_service_total: f64,
    pub cash_after_debt: f64,
    pub advertising_annual: f64,
    pub ad_spend_total: f64,
    /// Annual net profit minus the sum of monthly net profit. Non-zero when
    /// job supplies or non-direct labor are planned, or when the monthly ad
    /// budget differs from the annual advertising line.
    pub monthly_profit_variance: f64,
    pub product_mix_total_pct: f64,
    pub monthly_breakdown: Vec<MonthlyRecord>,
    pub quarterly_rollup: Vec<QuarterlyRollup>,
    pub product_allocation: Vec<ProductAllocation>,
    pub overhead_ranking: Vec<OverheadRank>,
    pub comparison: Comparison,
    pub warnings: Vec<ValidationWarning>,
}

impl DerivedFinancials {
    /// The first headline figure that came out infinite or NaN, if any.
    fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("total_overhead", self.total_overhead),
            ("revenue_goal", self.revenue_goal),
            ("direct_labor", self.direct_labor),
            ("payroll_taxes", self.payroll_taxes),
            ("commission", self.commission),
            ("total_cogs_labor", self.total_cogs_labor),
            ("labor_pct", self.labor_pct),
            ("net_profit_pct", self.net_profit_pct),
            ("net_profit_dollars", self.net_profit_dollars),
            ("materials_dollars", self.materials_dollars),
            ("gross_margin_pct", self.gross_margin_pct),
            ("gross_margin_dollars", self.gross_margin_dollars),
            ("cogs_total", self.cogs_total),
            ("project_count", self.project_count),
            ("avg_sale_value", self.avg_sale_value),
            ("debt_service_total", self.debt_service_total),
            ("cash_after_debt", self.cash_after_debt),
            ("ad_spend_total", self.ad_spend_total),
            ("monthly_profit_variance", self.monthly_profit_variance),
            ("product_mix_total_pct", self.product_mix_total_pct),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), BudgetError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BudgetError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), BudgetError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(BudgetError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}

fn check_pct(field: &str, value: f64) -> Result<(), BudgetError> {
    check_amount(field, value)?;
    if value > 100.0 {
        return Err(BudgetError::invalid(
            field,
            format!("must be at most 100, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects any snapshot the derivation is not defined on.
pub fn validate(params: &BudgetParameters) -> Result<(), BudgetError> {
    check_pct("overhead_pct", params.overhead_pct)?;
    if params.overhead_pct <= 0.0 {
        return Err(BudgetError::invalid(
            "overhead_pct",
            "must be greater than zero to solve a revenue goal",
        ));
    }
    check_pct("materials_pct", params.materials_pct)?;
    check_pct("commission_pct", params.commission_pct)?;
    check_pct("job_supplies_pct", params.job_supplies_pct)?;
    check_pct("non_direct_labor_pct", params.non_direct_labor_pct)?;
    check_amount("revenue_per_man_hour", params.revenue_per_man_hour)?;
    check_amount("total_man_hours", params.total_man_hours)?;

    for (i, crews) in params.crews_by_month.iter().enumerate() {
        check_amount(&format!("crews_by_month[{i}]"), *crews)?;
    }
    for (i, spend) in params.monthly_ad_spend.iter().enumerate() {
        check_amount(&format!("monthly_ad_spend[{i}]"), *spend)?;
    }
    for (i, product) in params.products.iter().enumerate() {
        check_pct(&format!("products[{i}].mix_pct"), product.mix_pct)?;
        check_amount(
            &format!("products[{i}].avg_sale_value"),
            product.avg_sale_value,
        )?;
    }
    for item in &params.overhead_line_items.items {
        check_amount(&format!("overhead_line_items.{}", item.name), item.amount)?;
    }
    check_pct(
        "overhead_line_items.payroll_tax_rate_pct",
        params.overhead_line_items.payroll_tax_rate_pct,
    )?;
    for (i, member) in params.crew_members.iter().enumerate() {
        check_amount(
            &format!("crew_members[{i}].annual_compensation"),
            member.annual_compensation,
        )?;
    }
    check_amount(
        "shop_manager.annual_compensation",
        params.shop_manager.annual_compensation,
    )?;
    for debt in &params.debt_obligations {
        check_amount(&format!("debt_obligations.{}", debt.name), debt.annual_payment)?;
    }

    let prior = &params.prior_period_snapshot;
    check_amount("prior_period_snapshot.revenue", prior.revenue)?;
    // A prior-year loss is expected data.
    check_finite("prior_period_snapshot.net_profit", prior.net_profit)?;
    check_pct("prior_period_snapshot.overhead_pct", prior.overhead_pct)?;
    check_pct("prior_period_snapshot.materials_pct", prior.materials_pct)?;
    if prior.project_count < 0 {
        return Err(BudgetError::invalid(
            "prior_period_snapshot.project_count",
            format!("must not be negative, got {}", prior.project_count),
        ));
    }
    Ok(())
}

/// Derives the complete financial plan for `params`.
pub fn compute(params: &BudgetParameters) -> Result<DerivedFinancials, BudgetError> {
    validate(params)?;
    let weights = normalize_weights(&params.month_weights)?;
    let totals = aggregate_costs(params);
    let revenue_goal = solve_revenue_goal(totals.total_overhead, params.overhead_pct)?;
    let costs = decompose_costs(params, revenue_goal, totals.direct_labor);

    let advertising_annual = params.overhead_line_items.advertising();
    let monthly_breakdown = accumulate_net_profit(allocate_monthly(&AllocationInputs {
        revenue_goal,
        cogs_pct: costs.cogs_pct,
        total_overhead: totals.total_overhead,
        advertising_annual,
        weights: &weights,
        ad_spend: &params.monthly_ad_spend,
        crews: &params.crews_by_month,
        production_days: &params.production_days,
    }));
    let quarterly_rollup = quarterly_rollup(&monthly_breakdown);
    let monthly_net_profit = monthly_breakdown
        .last()
        .map_or(0.0, |m| m.cumulative_net_profit);

    let products = allocate_products(&params.products, revenue_goal);
    let mut warnings = Vec::new();
    if !products.mix_is_balanced() {
        debug!(total_pct = products.mix_total_pct, "Product mix does not total 100%");
        warnings.push(ValidationWarning::ProductMixTotal {
            total_pct: products.mix_total_pct,
        });
    }

    let debt_service_total: f64 = params
        .debt_obligations
        .iter()
        .map(|debt| debt.annual_payment)
        .sum();

    let comparison = compare(
        &params.prior_period_snapshot,
        &CurrentPeriod {
            revenue: revenue_goal,
            net_profit: costs.net_profit_dollars,
            overhead_pct: params.overhead_pct,
            materials_pct: params.materials_pct,
            project_count: products.project_count,
        },
    );

    debug!(
        revenue_goal,
        net_profit = costs.net_profit_dollars,
        warnings = warnings.len(),
        "Derived budget plan"
    );

    let plan = DerivedFinancials {
        total_overhead: totals.total_overhead,
        revenue_goal,
        direct_labor: totals.direct_labor,
        payroll_taxes: totals.payroll_taxes,
        commission: costs.commission,
        total_cogs_labor: costs.total_cogs_labor,
        labor_pct: costs.labor_pct,
        net_profit_pct: costs.net_profit_pct,
        net_profit_dollars: costs.net_profit_dollars,
        materials_dollars: costs.materials_dollars,
        gross_margin_pct: costs.gross_margin_pct,
        gross_margin_dollars: costs.gross_margin_dollars,
        cogs_total: costs.cogs_total,
        project_count: products.project_count,
        avg_sale_value: products.avg_sale_value,
        debt_service_total,
        cash_after_debt: costs.net_profit_dollars - debt_service_total,
        advertising_annual,
        ad_spend_total: params.monthly_ad_spend.iter().sum(),
        monthly_profit_variance: costs.net_profit_dollars - monthly_net_profit,
        product_mix_total_pct: products.mix_total_pct,
        monthly_breakdown,
        quarterly_rollup,
        product_allocation: products.allocations,
        overhead_ranking: rank_overhead(&params.overhead_line_items, totals.payroll_taxes),
        comparison,
        warnings,
    };

    // Finite inputs can still overflow once summed or scaled.
    if let Some((field, value)) = plan.first_non_finite() {
        return Err(BudgetError::invalid(
            field,
            format!("derived value is not finite ({value})"),
        ));
    }
    Ok(plan)
}
