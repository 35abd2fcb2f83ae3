//! Monthly proration of the annual plan, running profit, and quarterly rollups.

use chrono::Month;
use serde::{Deserialize, Serialize};

/// One period of the planned P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub period: String,
    pub revenue: f64,
    pub cogs: f64,
    pub gross_margin: f64,
    pub gross_margin_pct: f64,
    pub overhead: f64,
    pub net_profit: f64,
    pub cumulative_net_profit: f64,
    pub crew_count: f64,
    pub production_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRollup {
    pub label: String,
    pub revenue: f64,
    pub gross_margin: f64,
    pub net_profit: f64,
}

/// Annual figures and per-period series to spread across the calendar.
///
/// Every per-period slice must have the same length as `weights`.
#[derive(Debug, Clone, Copy)]
pub struct AllocationInputs<'a> {
    pub revenue_goal: f64,
    pub cogs_pct: f64,
    pub total_overhead: f64,
    pub advertising_annual: f64,
    /// Normalized weights summing to 1.
    pub weights: &'a [f64],
    pub ad_spend: &'a [f64],
    pub crews: &'a [f64],
    pub production_days: &'a [u32],
}

fn period_label(index: usize) -> String {
    u8::try_from(index + 1)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|month| month.name()[..3].to_string())
        .unwrap_or_else(|| format!("P{}", index + 1))
}

/// Prorates revenue, COGS and overhead by weight, in calendar order.
///
/// Advertising is prorated along with the rest of overhead and then swapped
/// for that period's literal ad spend. `cumulative_net_profit` is left at zero
/// until [`accumulate_net_profit`] runs.
pub fn allocate_monthly(inputs: &AllocationInputs<'_>) -> Vec<MonthlyRecord> {
    inputs
        .weights
        .iter()
        .enumerate()
        .map(|(i, weight)| {
            let revenue = inputs.revenue_goal * weight;
            let cogs = revenue * inputs.cogs_pct / 100.0;
            let gross_margin = revenue - cogs;
            let overhead = inputs.total_overhead * weight - inputs.advertising_annual * weight
                + inputs.ad_spend[i];
            MonthlyRecord {
                period: period_label(i),
                revenue,
                cogs,
                gross_margin,
                gross_margin_pct: if revenue > 0.0 {
                    gross_margin / revenue * 100.0
                } else {
                    0.0
                },
                overhead,
                net_profit: gross_margin - overhead,
                cumulative_net_profit: 0.0,
                crew_count: inputs.crews[i],
                production_days: inputs.production_days[i],
            }
        })
        .collect()
}

/// Fills in the running net profit, seeded at zero.
pub fn accumulate_net_profit(records: Vec<MonthlyRecord>) -> Vec<MonthlyRecord> {
    records
        .into_iter()
        .scan(0.0, |running, record| {
            *running += record.net_profit;
            Some(MonthlyRecord {
                cumulative_net_profit: *running,
                ..record
            })
        })
        .collect()
}

/// Sums consecutive groups of three periods into quarters.
pub fn quarterly_rollup(records: &[MonthlyRecord]) -> Vec<QuarterlyRollup> {
    records
        .chunks(3)
        .enumerate()
        .map(|(q, months)| QuarterlyRollup {
            label: format!("Q{}", q + 1),
            revenue: months.iter().map(|m| m.revenue).sum(),
            gross_margin: months.iter().map(|m| m.gross_margin).sum(),
            net_profit: months.iter().map(|m| m.net_profit).sum(),
        })
        .collect()
}
