use super::ui;
use crate::core::params::PERIODS;
use crate::core::{BudgetParameters, DerivedFinancials};
use comfy_table::{Cell, CellAlignment, Color};

fn active_cell(active: bool) -> Cell {
    if active {
        Cell::new("Y")
            .fg(Color::Blue)
            .set_alignment(CellAlignment::Center)
    } else {
        Cell::new("")
    }
}

pub fn render(params: &BudgetParameters, plan: &DerivedFinancials) -> String {
    let periods: Vec<&str> = plan
        .monthly_breakdown
        .iter()
        .map(|m| m.period.as_str())
        .collect();

    let mut output = ui::heading("Crew Members");
    let mut roster = ui::new_styled_table();
    roster.set_header(
        [ui::header_cell("Name"), ui::header_cell("Annual")]
            .into_iter()
            .chain(periods.iter().map(|p| ui::header_cell(&p[..1])))
            .collect::<Vec<_>>(),
    );
    for member in &params.crew_members {
        roster.add_row(
            [
                Cell::new(&member.name),
                ui::money_cell(member.annual_compensation),
            ]
            .into_iter()
            .chain(member.active_months.iter().map(|active| active_cell(*active)))
            .collect::<Vec<_>>(),
        );
    }
    roster.add_row(
        [
            Cell::new(&params.shop_manager.name),
            ui::money_cell(params.shop_manager.annual_compensation),
        ]
        .into_iter()
        .chain((0..PERIODS).map(|_| active_cell(true)))
        .collect::<Vec<_>>(),
    );
    roster.add_row(vec![
        ui::total_cell("TOTAL LABOR"),
        ui::money_cell(plan.direct_labor),
    ]);
    output.push_str(&roster.to_string());

    output.push_str(&ui::heading("Crews / Month"));
    let headcount = params.active_headcount();
    let mut crews = ui::new_styled_table();
    crews.set_header(
        std::iter::once(ui::header_cell(""))
            .chain(periods.iter().map(|p| ui::header_cell(p)))
            .collect::<Vec<_>>(),
    );
    crews.add_row(
        std::iter::once(Cell::new("Crews"))
            .chain(
                params
                    .crews_by_month
                    .iter()
                    .map(|c| Cell::new(c).set_alignment(CellAlignment::Right)),
            )
            .collect::<Vec<_>>(),
    );
    crews.add_row(
        std::iter::once(Cell::new("Active staff"))
            .chain(
                headcount
                    .iter()
                    .map(|c| Cell::new(c).set_alignment(CellAlignment::Right)),
            )
            .collect::<Vec<_>>(),
    );
    output.push_str(&crews.to_string());

    output.push_str(&ui::heading("Labor Summary"));
    let mut labor = ui::new_styled_table();
    labor.add_row(vec![Cell::new("Direct Labor"), ui::money_cell(plan.direct_labor)]);
    labor.add_row(vec![
        Cell::new(format!("Commissions ({}%)", params.commission_pct)),
        ui::money_cell(plan.commission),
    ]);
    labor.add_row(vec![Cell::new("Payroll Taxes"), ui::money_cell(plan.payroll_taxes)]);
    labor.add_row(vec![
        ui::total_cell("Total Labor"),
        ui::money_cell(plan.total_cogs_labor),
    ]);
    labor.add_row(vec![Cell::new("Labor %"), ui::pct_cell(plan.labor_pct)]);
    output.push_str(&labor.to_string());

    output.push_str(&ui::heading("Debt Service"));
    let mut debt = ui::new_styled_table();
    debt.set_header(vec![ui::header_cell("Obligation"), ui::header_cell("Annual")]);
    for obligation in &params.debt_obligations {
        debt.add_row(vec![
            Cell::new(&obligation.name),
            ui::money_cell(obligation.annual_payment),
        ]);
    }
    debt.add_row(vec![
        ui::total_cell("Total"),
        ui::money_cell(plan.debt_service_total),
    ]);
    output.push_str(&debt.to_string());

    output
}
