use serde::{Deserialize, Serialize};

use lifebalance_domain::aggregate::AggregateStat;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendDto {
    pub average: f64,
    pub sample_count: u32,
    pub percent_change: f64,
    pub is_increasing: bool,
}

impl From<AggregateStat> for TrendDto {
    fn from(stat: AggregateStat) -> Self {
        Self {
            average: stat.average,
            sample_count: stat.sample_count,
            percent_change: stat.percent_change,
            is_increasing: stat.is_increasing,
        }
    }
}

/// Trend badge for one series: average of the current window plus its
/// trend against the window before. Either part is `None` until there is
/// enough data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowTrendDto {
    pub user_id: String,
    pub activity_kind: String,
    pub window_days: u32,
    pub start_date: String,
    pub end_date: String,
    pub average: Option<f64>,
    pub trend: Option<TrendDto>,
}
