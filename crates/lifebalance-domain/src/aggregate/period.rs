use serde::{Deserialize, Serialize};

use crate::activity::DateKey;
use crate::shared::DomainError;
use crate::streak::StreakHistory;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub total_days: u32,
    pub qualifying_days: u32,
    /// Percentage 0.0 - 100.0
    pub completion_rate: f64,
}

/// Share of qualifying days over the inclusive range `start..=end`.
pub fn completion_rate(
    history: &StreakHistory,
    start: DateKey,
    end: DateKey,
) -> Result<PeriodStats, DomainError> {
    if start > end {
        return Err(DomainError::InvalidInput(format!(
            "Range start {} is after end {}",
            start, end
        )));
    }

    let total_days = (start.days_until(&end) + 1) as u32;
    let qualifying_days = history
        .range(start..=end)
        .filter(|(_, entry)| entry.completed)
        .count() as u32;

    Ok(PeriodStats {
        total_days,
        qualifying_days,
        completion_rate: (qualifying_days as f64 / total_days as f64) * 100.0,
    })
}

/// First and last day of a calendar month.
pub fn month_range(year: i32, month: u32) -> Result<(DateKey, DateKey), DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation("Invalid month".to_string()));
    }

    let first_day = DateKey::from_ymd(year, month, 1)?;
    let first_day_next_month = if month == 12 {
        DateKey::from_ymd(year + 1, 1, 1)?
    } else {
        DateKey::from_ymd(year, month + 1, 1)?
    };
    let last_day = first_day_next_month
        .pred()
        .ok_or_else(|| DomainError::Validation("Invalid date".to_string()))?;

    Ok((first_day, last_day))
}

pub fn month_stats(
    history: &StreakHistory,
    year: i32,
    month: u32,
) -> Result<PeriodStats, DomainError> {
    let (first_day, last_day) = month_range(year, month)?;
    completion_rate(history, first_day, last_day)
}
