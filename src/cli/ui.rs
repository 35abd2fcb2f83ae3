use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole dollars with thousands separators; losses in parentheses.
pub fn format_money(value: f64) -> String {
    let rounded = value.round();
    let grouped = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("(${grouped})")
    } else {
        format!("${grouped}")
    }
}

/// Thousands of dollars, e.g. `$154K`.
pub fn format_money_k(value: f64) -> String {
    let thousands = format!("{:.0}", (value / 1000.0).abs());
    if value < 0.0 {
        format!("(${thousands}K)")
    } else {
        format!("${thousands}K")
    }
}

pub fn format_pct(value: f64) -> String {
    format!("{value:.1}%")
}

/// Right-aligned money cell, red when negative.
pub fn money_cell(value: f64) -> Cell {
    let cell = Cell::new(format_money(value)).set_alignment(CellAlignment::Right);
    if value.round() < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn pct_cell(value: f64) -> Cell {
    Cell::new(format_pct(value)).set_alignment(CellAlignment::Right)
}

/// Right-aligned cell for a delta, green when it is an improvement.
pub fn delta_cell(text: String, improved: bool) -> Cell {
    let color = if improved { Color::Green } else { Color::Red };
    Cell::new(text)
        .fg(color)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// A bold row label used for table totals.
pub fn total_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Section heading printed above a table.
pub fn heading(text: &str) -> String {
    format!("\n{}\n", style_text(text, StyleType::Title))
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    format!("\n{}", "─".repeat(term_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(999.4), "$999");
        assert_eq!(format_money(1000.0), "$1,000");
        assert_eq!(format_money(2105250.0), "$2,105,250");
        assert_eq!(format_money(-254809.0), "($254,809)");
        assert_eq!(format_money(-0.2), "$0");
    }

    #[test]
    fn test_format_money_k() {
        assert_eq!(format_money_k(154153.0), "$154K");
        assert_eq!(format_money_k(-25000.0), "($25K)");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(19.63549), "19.6%");
        assert_eq!(format_pct(-5.0), "-5.0%");
    }
}
