mod averaging;
mod period;
mod trend;

pub use averaging::{
    average_progress, life_domain_progress, LifeDomainProgress, DEFAULT_EXCLUDED_COLUMNS,
};
pub use period::{completion_rate, month_range, month_stats, PeriodStats};
pub use trend::{compute_trend, mean, trend_over_windows, AggregateStat};
