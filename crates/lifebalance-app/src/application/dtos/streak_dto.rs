use serde::{Deserialize, Serialize};

use lifebalance_domain::aggregate::PeriodStats;
use lifebalance_domain::progress::TodayProgress;
use lifebalance_domain::shared::UserId;
use lifebalance_domain::streak::StreakState;
use lifebalance_domain::ActivityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayProgressDto {
    pub completed: u32,
    pub total: u32,
    pub ratio: Option<f64>,
    pub is_qualifying: bool,
}

impl From<TodayProgress> for TodayProgressDto {
    fn from(progress: TodayProgress) -> Self {
        Self {
            completed: progress.completed,
            total: progress.total,
            ratio: progress.ratio(),
            is_qualifying: progress.is_qualifying(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakDto {
    pub user_id: String,
    pub activity_kind: String,
    pub today: String, // YYYY-MM-DD
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_qualifying_days: u32,
    pub last_qualifying_day: Option<String>,
    pub today_progress: TodayProgressDto,
}

impl StreakDto {
    pub fn from_state(
        user_id: &UserId,
        kind: ActivityKind,
        today: &str,
        state: &StreakState,
    ) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            activity_kind: kind.as_tag(),
            today: today.to_string(),
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            total_qualifying_days: state.total_qualifying_days,
            last_qualifying_day: state.last_qualifying_day.map(|d| d.to_string()),
            today_progress: state.today_progress.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDayDto {
    pub date: String, // YYYY-MM-DD
    pub is_qualifying: bool,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub qualifying_days: u32,
    pub completion_rate: f64, // percentage (0.0 - 100.0)
}

impl From<PeriodStats> for MonthStatsDto {
    fn from(stats: PeriodStats) -> Self {
        Self {
            total_days: stats.total_days,
            qualifying_days: stats.qualifying_days,
            completion_rate: stats.completion_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDto {
    pub user_id: String,
    pub activity_kind: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDayDto>,
    pub month_stats: MonthStatsDto,
}
