use super::ui;
use crate::core::comparison::MetricDelta;
use crate::core::{BudgetParameters, DerivedFinancials};
use comfy_table::{Cell, CellAlignment};

fn signed_money_k(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{}", ui::format_money_k(delta))
    } else {
        ui::format_money_k(delta)
    }
}

fn comparison_row(label: &str, metric: &MetricDelta<f64>, as_pct: bool) -> Vec<Cell> {
    let (prior, current, delta) = if as_pct {
        (
            ui::format_pct(metric.prior),
            ui::format_pct(metric.current),
            format!("{:.1}pp", metric.delta),
        )
    } else {
        (
            ui::format_money(metric.prior),
            ui::format_money(metric.current),
            signed_money_k(metric.delta),
        )
    };
    vec![
        Cell::new(label),
        Cell::new(prior).set_alignment(CellAlignment::Right),
        Cell::new(current).set_alignment(CellAlignment::Right),
        ui::delta_cell(delta, metric.improved),
    ]
}

/// Renders KPIs, the four buckets, quarters, cash flow and the prior-period
/// comparison.
pub fn render(plan_name: &str, params: &BudgetParameters, plan: &DerivedFinancials) -> String {
    let net_style = if plan.net_profit_dollars >= 0.0 {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };
    let mut output = format!(
        "Plan: {}\n\nRevenue Target: {}   Net: {}\n",
        ui::style_text(plan_name, ui::StyleType::Title),
        ui::style_text(&ui::format_money(plan.revenue_goal), ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_money(plan.net_profit_dollars), net_style),
    );

    let mut kpis = ui::new_styled_table();
    kpis.set_header(vec![
        ui::header_cell("Metric"),
        ui::header_cell("Amount"),
        ui::header_cell("Detail"),
    ]);
    kpis.add_row(vec![
        Cell::new("Revenue Goal"),
        ui::money_cell(plan.revenue_goal),
        Cell::new(format!(
            "{} projects @ {} avg",
            plan.project_count.round(),
            ui::format_money(plan.avg_sale_value)
        )),
    ]);
    kpis.add_row(vec![
        Cell::new("Gross Margin"),
        ui::money_cell(plan.gross_margin_dollars),
        Cell::new(ui::format_pct(plan.gross_margin_pct)),
    ]);
    kpis.add_row(vec![
        Cell::new("Total Overhead"),
        ui::money_cell(plan.total_overhead),
        Cell::new(ui::format_pct(params.overhead_pct)),
    ]);
    kpis.add_row(vec![
        Cell::new("Net Profit"),
        ui::money_cell(plan.net_profit_dollars),
        Cell::new(ui::format_pct(plan.net_profit_pct)),
    ]);
    output.push_str(&kpis.to_string());

    output.push_str(&ui::heading("4 Buckets Breakdown"));
    let mut buckets = ui::new_styled_table();
    buckets.set_header(vec![
        ui::header_cell("Bucket"),
        ui::header_cell("% of Revenue"),
        ui::header_cell("Amount"),
    ]);
    for (label, pct, amount) in [
        ("Overhead", params.overhead_pct, plan.total_overhead),
        ("Labor & Comm.", plan.labor_pct, plan.total_cogs_labor),
        ("Materials", params.materials_pct, plan.materials_dollars),
        ("Net Profit", plan.net_profit_pct, plan.net_profit_dollars),
    ] {
        buckets.add_row(vec![Cell::new(label), ui::pct_cell(pct), ui::money_cell(amount)]);
    }
    output.push_str(&buckets.to_string());

    output.push_str(&ui::heading("Quarterly Rollup"));
    let mut quarters = ui::new_styled_table();
    quarters.set_header(vec![
        ui::header_cell("Quarter"),
        ui::header_cell("Revenue"),
        ui::header_cell("Gross Margin"),
        ui::header_cell("Net Profit"),
    ]);
    for quarter in &plan.quarterly_rollup {
        quarters.add_row(vec![
            Cell::new(&quarter.label),
            ui::money_cell(quarter.revenue),
            ui::money_cell(quarter.gross_margin),
            ui::money_cell(quarter.net_profit),
        ]);
    }
    output.push_str(&quarters.to_string());

    output.push_str(&ui::heading("Cash Flow Summary"));
    let mut cash = ui::new_styled_table();
    cash.set_header(vec![
        ui::header_cell("Net Operating Profit"),
        ui::header_cell("Debt Service"),
        ui::header_cell("Cash After Debt"),
    ]);
    cash.add_row(vec![
        ui::money_cell(plan.net_profit_dollars),
        ui::money_cell(-plan.debt_service_total),
        ui::money_cell(plan.cash_after_debt),
    ]);
    output.push_str(&cash.to_string());

    output.push_str(&ui::heading("Prior Period vs Plan"));
    let comparison = &plan.comparison;
    let mut compare = ui::new_styled_table();
    compare.set_header(vec![
        ui::header_cell("Metric"),
        ui::header_cell("Prior"),
        ui::header_cell("Plan"),
        ui::header_cell("Change"),
    ]);
    compare.add_row(comparison_row("Revenue", &comparison.revenue, false));
    compare.add_row(comparison_row("Net Profit", &comparison.net_profit, false));
    compare.add_row(comparison_row("Overhead %", &comparison.overhead_pct, true));
    compare.add_row(comparison_row("Materials %", &comparison.materials_pct, true));
    let projects = &comparison.project_count;
    compare.add_row(vec![
        Cell::new("Projects"),
        Cell::new(projects.prior).set_alignment(CellAlignment::Right),
        Cell::new(projects.current).set_alignment(CellAlignment::Right),
        ui::delta_cell(format!("{:+}", projects.delta), projects.improved),
    ]);
    output.push_str(&compare.to_string());

    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            &format!(
                "Planning inputs: {}/man hour, {} man hours, {} team members",
                ui::format_money(params.revenue_per_man_hour),
                params.total_man_hours,
                params.team_members
            ),
            ui::StyleType::Subtle,
        )
    ));

    for warning in &plan.warnings {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(&format!("Warning: {warning}"), ui::StyleType::Error)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute;

    #[test]
    fn test_render_summary() {
        let params = BudgetParameters::with_defaults();
        let plan = compute(&params).unwrap();
        let output = render("Test Plan", &params, &plan);

        assert!(output.contains("Test Plan"));
        assert!(output.contains("$2,105,250"));
        assert!(output.contains("4 Buckets Breakdown"));
        assert!(output.contains("Q4"));
        assert!(output.contains("Cash After Debt"));
        assert!(output.contains("-5.0pp"));
        assert!(output.contains("Product mix totals 99.0%"));
    }
}
