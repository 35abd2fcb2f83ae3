use super::ui;
use crate::core::{BudgetParameters, DerivedFinancials, ValidationWarning};
use comfy_table::{Cell, CellAlignment, Color};

fn mix_is_flagged(plan: &DerivedFinancials) -> bool {
    plan.warnings
        .iter()
        .any(|warning| matches!(warning, ValidationWarning::ProductMixTotal { .. }))
}

pub fn render(params: &BudgetParameters, plan: &DerivedFinancials) -> String {
    let mut output = ui::heading("Product Details");

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Product"),
        ui::header_cell("Mix %"),
        ui::header_cell("Avg Sale"),
        ui::header_cell("Revenue"),
        ui::header_cell("Projects"),
    ]);

    for (product, allocation) in params.products.iter().zip(&plan.product_allocation) {
        let projects = if allocation.project_count > 0.0 {
            format!("{:.0}", allocation.project_count.round())
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(&allocation.name),
            ui::pct_cell(allocation.mix_pct),
            ui::money_cell(product.avg_sale_value),
            ui::money_cell(allocation.revenue_value),
            Cell::new(projects).set_alignment(CellAlignment::Right),
        ]);
    }

    let mix_cell = if mix_is_flagged(plan) {
        ui::pct_cell(plan.product_mix_total_pct).fg(Color::Red)
    } else {
        ui::pct_cell(plan.product_mix_total_pct)
    };
    table.add_row(vec![
        ui::total_cell("TOTAL"),
        mix_cell,
        ui::money_cell(plan.avg_sale_value),
        ui::money_cell(plan.revenue_goal),
        Cell::new(format!("{:.0}", plan.project_count.round())).set_alignment(CellAlignment::Right),
    ]);
    output.push_str(&table.to_string());

    for warning in &plan.warnings {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(&format!("Warning: {warning}"), ui::StyleType::Error)
        ));
    }

    output
}
