use super::ui;
use crate::core::{BudgetParameters, DerivedFinancials};
use comfy_table::{Cell, CellAlignment};

pub fn render(params: &BudgetParameters, plan: &DerivedFinancials) -> String {
    let mut output = ui::heading("Monthly P&L Breakdown");

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Revenue"),
        ui::header_cell("COGS"),
        ui::header_cell("Gross Margin"),
        ui::header_cell("GM %"),
        ui::header_cell("Overhead"),
        ui::header_cell("Net Profit"),
        ui::header_cell("Cumulative"),
        ui::header_cell("Crews"),
        ui::header_cell("Prod Days"),
    ]);

    for month in &plan.monthly_breakdown {
        let gm_pct = if month.revenue > 0.0 {
            ui::pct_cell(month.gross_margin_pct)
        } else {
            Cell::new("-").set_alignment(CellAlignment::Right)
        };
        table.add_row(vec![
            Cell::new(&month.period),
            ui::money_cell(month.revenue),
            ui::money_cell(month.cogs),
            ui::money_cell(month.gross_margin),
            gm_pct,
            ui::money_cell(month.overhead),
            ui::money_cell(month.net_profit),
            ui::money_cell(month.cumulative_net_profit),
            Cell::new(month.crew_count).set_alignment(CellAlignment::Right),
            Cell::new(month.production_days).set_alignment(CellAlignment::Right),
        ]);
    }

    // Annual figures, not column sums
    table.add_row(vec![
        ui::total_cell("TOTAL"),
        ui::money_cell(plan.revenue_goal),
        ui::money_cell(plan.cogs_total),
        ui::money_cell(plan.gross_margin_dollars),
        ui::pct_cell(plan.gross_margin_pct),
        ui::money_cell(plan.total_overhead),
        ui::money_cell(plan.net_profit_dollars),
        Cell::new(""),
        Cell::new(""),
        Cell::new(params.production_days.iter().sum::<u32>()).set_alignment(CellAlignment::Right),
    ]);
    output.push_str(&table.to_string());

    if plan.monthly_profit_variance.abs() >= 0.5 {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "Monthly net profit sums to {}; the annual figure excludes job supplies, non-direct labor and ad budget changes.",
                    ui::format_money(plan.net_profit_dollars - plan.monthly_profit_variance)
                ),
                ui::StyleType::Subtle,
            )
        ));
    }

    output.push_str(&ui::heading("Monthly Advertising Budget"));
    let mut ads = ui::new_styled_table();
    ads.set_header(
        plan.monthly_breakdown
            .iter()
            .map(|m| ui::header_cell(&m.period))
            .chain(std::iter::once(ui::header_cell("Total")))
            .collect::<Vec<_>>(),
    );
    ads.add_row(
        params
            .monthly_ad_spend
            .iter()
            .map(|spend| ui::money_cell(*spend))
            .chain(std::iter::once(ui::money_cell(plan.ad_spend_total)))
            .collect::<Vec<_>>(),
    );
    output.push_str(&ads.to_string());

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute;

    #[test]
    fn test_render_monthly() {
        let params = BudgetParameters::with_defaults();
        let plan = compute(&params).unwrap();
        let output = render(&params, &plan);

        assert!(output.contains("Monthly P&L Breakdown"));
        assert!(output.contains("Jan"));
        assert!(output.contains("Dec"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$140,000"));
        assert!(output.contains("Monthly net profit sums to"));
    }
}
