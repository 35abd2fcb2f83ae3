use crate::core::params::OverheadLineItems;
use serde::{Deserialize, Serialize};

pub const PAYROLL_TAX: &str = "Payroll Tax";
pub const OTHER: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadRank {
    pub category: String,
    pub amount: f64,
}

/// Orders overhead categories by annual amount, largest first.
///
/// Minor line items collapse into a single "Other" entry and payroll tax is
/// ranked as its own category. Ties keep input order.
pub fn rank_overhead(line_items: &OverheadLineItems, payroll_taxes: f64) -> Vec<OverheadRank> {
    let mut ranking: Vec<OverheadRank> = line_items
        .items
        .iter()
        .filter(|item| !item.minor)
        .map(|item| OverheadRank {
            category: item.name.clone(),
            amount: item.amount,
        })
        .collect();

    ranking.push(OverheadRank {
        category: PAYROLL_TAX.to_string(),
        amount: payroll_taxes,
    });

    if line_items.items.iter().any(|item| item.minor) {
        ranking.push(OverheadRank {
            category: OTHER.to_string(),
            amount: line_items
                .items
                .iter()
                .filter(|item| item.minor)
                .map(|item| item.amount)
                .sum(),
        });
    }

    // sort_by is stable
    ranking.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{BudgetParameters, OverheadItem};

    fn item(name: &str, amount: f64, minor: bool) -> OverheadItem {
        OverheadItem {
            name: name.to_string(),
            amount,
            minor,
        }
    }

    #[test]
    fn test_ranking_descending_with_other_bucket() {
        let line_items = OverheadLineItems {
            items: vec![
                item("Rent", 48000.0, false),
                item("Meals", 800.0, true),
                item("Advertising", 140000.0, false),
                item("Misc", 2000.0, true),
            ],
            payroll_tax_rate_pct: 13.0,
        };
        let ranking = rank_overhead(&line_items, 30000.0);
        let categories: Vec<&str> = ranking.iter().map(|r| r.category.as_str()).collect();

        assert_eq!(categories, vec!["Advertising", "Rent", "Payroll Tax", "Other"]);
        assert_eq!(ranking[3].amount, 2800.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let line_items = OverheadLineItems {
            items: vec![
                item("Fuel", 20000.0, false),
                item("Leases", 20000.0, false),
            ],
            payroll_tax_rate_pct: 0.0,
        };
        let ranking = rank_overhead(&line_items, 20000.0);
        let categories: Vec<&str> = ranking.iter().map(|r| r.category.as_str()).collect();

        assert_eq!(categories, vec!["Fuel", "Leases", "Payroll Tax"]);
    }

    #[test]
    fn test_default_ranking_conserves_total() {
        let params = BudgetParameters::with_defaults();
        let ranking = rank_overhead(&params.overhead_line_items, 34580.0);

        assert_eq!(ranking[0].category, "OH Payroll");
        assert_eq!(ranking[1].category, "Advertising");
        let total: f64 = ranking.iter().map(|r| r.amount).sum();
        assert_eq!(total, 639100.0 + 34580.0);
        assert!(
            ranking
                .windows(2)
                .all(|pair| pair[0].amount >= pair[1].amount)
        );
    }
}
