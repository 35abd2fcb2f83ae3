//! Budget parameter snapshot, its default dataset, and copy-on-write edits.
//!
//! A `BudgetParameters` value is never edited in place by the engine. Every
//! edit operation below borrows the current snapshot and returns a new one, so
//! a caller can keep the previous snapshot around (for undo, or as a memo key)
//! without it changing underneath them.

use crate::core::error::BudgetError;
use serde::{Deserialize, Serialize};

/// Number of periods in the planning calendar.
pub const PERIODS: usize = 12;

/// Overhead line item whose annual amount is replaced by `monthly_ad_spend`.
pub const ADVERTISING: &str = "Advertising";

pub const DEFAULT_MONTH_WEIGHTS: [f64; PERIODS] = [
    0.09917, 0.02976, 0.03870, 0.05619, 0.05136, 0.07146, 0.16601, 0.10298, 0.11272, 0.10247,
    0.09222, 0.07685,
];

pub const DEFAULT_PRODUCTION_DAYS: [u32; PERIODS] = [22, 20, 20, 22, 21, 19, 21, 19, 20, 20, 18, 22];

/// Smallest raw weight a month can be given from a dollar target.
const MIN_TARGET_WEIGHT: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub mix_pct: f64,
    /// Values `<= 1` mark a line with no per-unit price; it never counts projects.
    pub avg_sale_value: f64,
    pub display_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadItem {
    pub name: String,
    pub amount: f64,
    /// Minor items are folded into "Other" when ranked.
    #[serde(default)]
    pub minor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadLineItems {
    pub items: Vec<OverheadItem>,
    pub payroll_tax_rate_pct: f64,
}

impl OverheadLineItems {
    /// Sum of every named line item. Payroll tax is not a line item.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Annual advertising amount, matched by name case-insensitively.
    pub fn advertising(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.name.eq_ignore_ascii_case(ADVERTISING))
            .map(|item| item.amount)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub annual_compensation: f64,
    pub active_months: [bool; PERIODS],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopManager {
    pub name: String,
    pub annual_compensation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtObligation {
    pub name: String,
    pub annual_payment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorPeriodSnapshot {
    pub revenue: f64,
    pub net_profit: f64,
    pub overhead_pct: f64,
    pub materials_pct: f64,
    pub project_count: i64,
}

/// Complete input to one derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetParameters {
    pub overhead_pct: f64,
    pub materials_pct: f64,
    pub commission_pct: f64,
    pub job_supplies_pct: f64,
    pub non_direct_labor_pct: f64,
    // Planning inputs kept for capacity modeling; not used by the derivation.
    pub revenue_per_man_hour: f64,
    pub total_man_hours: f64,
    pub team_members: u32,
    pub month_weights: [f64; PERIODS],
    pub crews_by_month: [f64; PERIODS],
    pub production_days: [u32; PERIODS],
    pub products: Vec<Product>,
    pub overhead_line_items: OverheadLineItems,
    pub monthly_ad_spend: [f64; PERIODS],
    pub crew_members: Vec<CrewMember>,
    pub shop_manager: ShopManager,
    pub debt_obligations: Vec<DebtObligation>,
    pub prior_period_snapshot: PriorPeriodSnapshot,
}

impl Default for BudgetParameters {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn product(name: &str, mix_pct: f64, avg_sale_value: f64, display_color: &str) -> Product {
    Product {
        name: name.to_string(),
        mix_pct,
        avg_sale_value,
        display_color: display_color.to_string(),
    }
}

fn overhead(name: &str, amount: f64, minor: bool) -> OverheadItem {
    OverheadItem {
        name: name.to_string(),
        amount,
        minor,
    }
}

fn crew(name: &str, annual_compensation: f64, active_from: usize) -> CrewMember {
    let mut active_months = [false; PERIODS];
    for month in active_months.iter_mut().skip(active_from) {
        *month = true;
    }
    CrewMember {
        name: name.to_string(),
        annual_compensation,
        active_months,
    }
}

fn debt(name: &str, annual_payment: f64) -> DebtObligation {
    DebtObligation {
        name: name.to_string(),
        annual_payment,
    }
}

fn out_of_range(field: &str, index: usize, len: usize) -> BudgetError {
    BudgetError::invalid(
        format!("{field}[{index}]"),
        format!("index out of range (length {len})"),
    )
}

fn check_period(field: &str, index: usize) -> Result<(), BudgetError> {
    if index < PERIODS {
        Ok(())
    } else {
        Err(out_of_range(field, index, PERIODS))
    }
}

impl BudgetParameters {
    /// Seed snapshot for a new plan. Every call returns a fresh, owned value.
    pub fn with_defaults() -> Self {
        BudgetParameters {
            overhead_pct: 32.0,
            materials_pct: 40.0,
            commission_pct: 7.0,
            job_supplies_pct: 2.5,
            non_direct_labor_pct: 2.0,
            revenue_per_man_hour: 145.0,
            total_man_hours: 11500.0,
            team_members: 14,
            month_weights: DEFAULT_MONTH_WEIGHTS,
            crews_by_month: [1.0, 1.0, 1.0, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5],
            production_days: DEFAULT_PRODUCTION_DAYS,
            products: vec![
                product("Vinyl", 22.0, 8250.0, "#3b82f6"),
                product("Aluminum", 6.0, 5500.0, "#22c55e"),
                product("Wood", 38.0, 14300.0, "#eab308"),
                product("Chainlink", 8.0, 10450.0, "#ef4444"),
                product("Avimore", 15.0, 14850.0, "#a855f7"),
                product("Steel", 1.5, 11550.0, "#ec4899"),
                product("Bufftech", 6.0, 30800.0, "#06b6d4"),
                product("Gate Ops", 1.25, 12650.0, "#84cc16"),
                // Unpriced service line. Whether it should count projects
                // is an open question with the business owner.
                product("Prefit", 1.25, 1.0, "#f97316"),
            ],
            overhead_line_items: OverheadLineItems {
                items: vec![
                    overhead("Rent", 48000.0, false),
                    overhead(ADVERTISING, 140000.0, false),
                    overhead("Insurance", 58000.0, false),
                    overhead("OH Payroll", 200000.0, false),
                    overhead("Utilities", 30000.0, false),
                    overhead("Fuel", 20000.0, false),
                    overhead("Benefits", 42000.0, false),
                    overhead("Leases", 20000.0, false),
                    overhead("Repairs", 12000.0, false),
                    overhead("Small Tools", 10000.0, false),
                    overhead("Office Supplies", 26000.0, false),
                    overhead("Prof Fees", 12000.0, true),
                    overhead("Bad Debts", 7500.0, true),
                    overhead("Education", 1500.0, true),
                    overhead("Travel", 2000.0, true),
                    overhead("Uniforms", 2500.0, true),
                    overhead("Shop Supplies", 3000.0, true),
                    overhead("Shipping", 300.0, true),
                    overhead("Dump Fees", 500.0, true),
                    overhead("Meals", 800.0, true),
                    overhead("Entertainment", 1000.0, true),
                    overhead("Misc", 2000.0, true),
                ],
                payroll_tax_rate_pct: 13.0,
            },
            monthly_ad_spend: [
                12000.0, 8000.0, 10000.0, 12000.0, 14000.0, 16000.0, 18000.0, 14000.0, 14000.0,
                10000.0, 8000.0, 4000.0,
            ],
            crew_members: vec![
                crew("Crew Lead 1", 60000.0, 0),
                crew("Crew Lead 2", 52000.0, 6),
                crew("Crew Lead 3", 38000.0, 0),
                crew("Crew Lead 4", 38000.0, 0),
                crew("Installer 5", 38000.0, 0),
            ],
            shop_manager: ShopManager {
                name: "Shop Manager".to_string(),
                annual_compensation: 40000.0,
            },
            debt_obligations: vec![
                debt("Truck Loan", 9600.0),
                debt("Van Loan", 0.0),
                debt("Line of Credit", 48000.0),
            ],
            prior_period_snapshot: PriorPeriodSnapshot {
                revenue: 1951097.0,
                net_profit: -254809.0,
                overhead_pct: 37.0,
                materials_pct: 39.0,
                project_count: 177,
            },
        }
    }

    pub fn with_overhead_pct(&self, pct: f64) -> Self {
        Self {
            overhead_pct: pct,
            ..self.clone()
        }
    }

    pub fn with_materials_pct(&self, pct: f64) -> Self {
        Self {
            materials_pct: pct,
            ..self.clone()
        }
    }

    pub fn with_commission_pct(&self, pct: f64) -> Self {
        Self {
            commission_pct: pct,
            ..self.clone()
        }
    }

    pub fn with_job_supplies_pct(&self, pct: f64) -> Self {
        Self {
            job_supplies_pct: pct,
            ..self.clone()
        }
    }

    pub fn with_non_direct_labor_pct(&self, pct: f64) -> Self {
        Self {
            non_direct_labor_pct: pct,
            ..self.clone()
        }
    }

    pub fn with_month_weight(&self, month: usize, weight: f64) -> Result<Self, BudgetError> {
        check_period("month_weights", month)?;
        let mut next = self.clone();
        next.month_weights[month] = weight;
        Ok(next)
    }

    /// Sets a month's raw weight so that it lands near `target` dollars of
    /// `revenue_goal`. The weight never drops below 0.001.
    pub fn with_month_revenue_target(
        &self,
        month: usize,
        target: f64,
        revenue_goal: f64,
    ) -> Result<Self, BudgetError> {
        if !(revenue_goal.is_finite() && revenue_goal > 0.0) {
            return Err(BudgetError::invalid(
                "revenue_goal",
                "must be a positive finite amount",
            ));
        }
        self.with_month_weight(month, (target / revenue_goal).max(MIN_TARGET_WEIGHT))
    }

    pub fn with_default_month_weights(&self) -> Self {
        Self {
            month_weights: DEFAULT_MONTH_WEIGHTS,
            ..self.clone()
        }
    }

    pub fn with_monthly_ad_spend(&self, month: usize, amount: f64) -> Result<Self, BudgetError> {
        check_period("monthly_ad_spend", month)?;
        let mut next = self.clone();
        next.monthly_ad_spend[month] = amount;
        Ok(next)
    }

    pub fn with_crews_in_month(&self, month: usize, crews: f64) -> Result<Self, BudgetError> {
        check_period("crews_by_month", month)?;
        let mut next = self.clone();
        next.crews_by_month[month] = crews;
        Ok(next)
    }

    pub fn with_product_mix(&self, index: usize, mix_pct: f64) -> Result<Self, BudgetError> {
        let mut next = self.clone();
        let len = next.products.len();
        let product = next
            .products
            .get_mut(index)
            .ok_or_else(|| out_of_range("products", index, len))?;
        product.mix_pct = mix_pct;
        Ok(next)
    }

    pub fn with_product_avg_sale(
        &self,
        index: usize,
        avg_sale_value: f64,
    ) -> Result<Self, BudgetError> {
        let mut next = self.clone();
        let len = next.products.len();
        let product = next
            .products
            .get_mut(index)
            .ok_or_else(|| out_of_range("products", index, len))?;
        product.avg_sale_value = avg_sale_value;
        Ok(next)
    }

    /// Sets an overhead line item by name, appending it when missing.
    pub fn with_overhead_item(&self, name: &str, amount: f64) -> Self {
        let mut next = self.clone();
        match next
            .overhead_line_items
            .items
            .iter_mut()
            .find(|item| item.name.eq_ignore_ascii_case(name))
        {
            Some(item) => item.amount = amount,
            None => next.overhead_line_items.items.push(OverheadItem {
                name: name.to_string(),
                amount,
                minor: false,
            }),
        }
        next
    }

    pub fn with_payroll_tax_rate_pct(&self, pct: f64) -> Self {
        let mut next = self.clone();
        next.overhead_line_items.payroll_tax_rate_pct = pct;
        next
    }

    /// Appends a seasonal hire active from May through November.
    pub fn with_crew_member_added(&self) -> Self {
        let mut next = self.clone();
        let mut active_months = [false; PERIODS];
        for month in active_months.iter_mut().take(11).skip(4) {
            *month = true;
        }
        next.crew_members.push(CrewMember {
            name: format!("New Hire {}", self.crew_members.len() + 1),
            annual_compensation: 35000.0,
            active_months,
        });
        next
    }

    /// Removes the last crew member. The roster never drops below one.
    pub fn without_last_crew_member(&self) -> Self {
        let mut next = self.clone();
        if next.crew_members.len() > 1 {
            next.crew_members.pop();
        }
        next
    }

    pub fn with_crew_compensation(
        &self,
        index: usize,
        annual_compensation: f64,
    ) -> Result<Self, BudgetError> {
        let mut next = self.clone();
        let len = next.crew_members.len();
        let member = next
            .crew_members
            .get_mut(index)
            .ok_or_else(|| out_of_range("crew_members", index, len))?;
        member.annual_compensation = annual_compensation;
        Ok(next)
    }

    pub fn with_crew_month_toggled(&self, index: usize, month: usize) -> Result<Self, BudgetError> {
        check_period("active_months", month)?;
        let mut next = self.clone();
        let len = next.crew_members.len();
        let member = next
            .crew_members
            .get_mut(index)
            .ok_or_else(|| out_of_range("crew_members", index, len))?;
        member.active_months[month] = !member.active_months[month];
        Ok(next)
    }

    pub fn with_shop_manager_compensation(&self, annual_compensation: f64) -> Self {
        let mut next = self.clone();
        next.shop_manager.annual_compensation = annual_compensation;
        next
    }

    /// Sets a debt payment by name, appending the obligation when missing.
    pub fn with_debt_payment(&self, name: &str, annual_payment: f64) -> Self {
        let mut next = self.clone();
        match next
            .debt_obligations
            .iter_mut()
            .find(|debt| debt.name.eq_ignore_ascii_case(name))
        {
            Some(debt) => debt.annual_payment = annual_payment,
            None => next.debt_obligations.push(DebtObligation {
                name: name.to_string(),
                annual_payment,
            }),
        }
        next
    }

    /// Number of crew members (plus the shop manager) active in each month.
    pub fn active_headcount(&self) -> [u32; PERIODS] {
        let mut headcount = [1u32; PERIODS];
        for member in &self.crew_members {
            for (count, active) in headcount.iter_mut().zip(member.active_months) {
                if active {
                    *count += 1;
                }
            }
        }
        headcount
    }
}
