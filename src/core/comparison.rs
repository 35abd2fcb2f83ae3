//! Year-over-year comparison against a prior-period snapshot.

use crate::core::params::PriorPeriodSnapshot;
use serde::{Deserialize, Serialize};

/// Which way a metric has to move to count as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta<T> {
    pub prior: T,
    pub current: T,
    pub delta: T,
    pub improved: bool,
}

impl<T> MetricDelta<T>
where
    T: Copy + PartialOrd + std::ops::Sub<Output = T>,
{
    pub fn new(prior: T, current: T, direction: Direction) -> Self {
        let improved = match direction {
            Direction::HigherIsBetter => current > prior,
            Direction::LowerIsBetter => current < prior,
        };
        MetricDelta {
            prior,
            current,
            delta: current - prior,
            improved,
        }
    }
}

/// Current-period values to set against the prior snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentPeriod {
    pub revenue: f64,
    pub net_profit: f64,
    pub overhead_pct: f64,
    pub materials_pct: f64,
    pub project_count: f64,
}

/// Dollar deltas are signed dollars, percentage deltas are percentage
/// points, and the project count delta is a whole number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub revenue: MetricDelta<f64>,
    pub net_profit: MetricDelta<f64>,
    pub overhead_pct: MetricDelta<f64>,
    pub materials_pct: MetricDelta<f64>,
    pub project_count: MetricDelta<i64>,
}

pub fn compare(prior: &PriorPeriodSnapshot, current: &CurrentPeriod) -> Comparison {
    Comparison {
        revenue: MetricDelta::new(prior.revenue, current.revenue, Direction::HigherIsBetter),
        net_profit: MetricDelta::new(
            prior.net_profit,
            current.net_profit,
            Direction::HigherIsBetter,
        ),
        overhead_pct: MetricDelta::new(
            prior.overhead_pct,
            current.overhead_pct,
            Direction::LowerIsBetter,
        ),
        materials_pct: MetricDelta::new(
            prior.materials_pct,
            current.materials_pct,
            Direction::LowerIsBetter,
        ),
        project_count: MetricDelta::new(
            prior.project_count,
            current.project_count.round() as i64,
            Direction::HigherIsBetter,
        ),
    }
}
