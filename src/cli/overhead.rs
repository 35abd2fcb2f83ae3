use super::ui;
use crate::core::DerivedFinancials;
use comfy_table::Cell;

pub fn render(plan: &DerivedFinancials) -> String {
    let mut output = ui::heading(&format!(
        "Overhead ({})",
        ui::format_money(plan.total_overhead)
    ));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Annual"),
        ui::header_cell("Share"),
    ]);
    for rank in &plan.overhead_ranking {
        let share = if plan.total_overhead > 0.0 {
            rank.amount / plan.total_overhead * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&rank.category),
            ui::money_cell(rank.amount),
            ui::pct_cell(share),
        ]);
    }
    output.push_str(&table.to_string());
    output
}
