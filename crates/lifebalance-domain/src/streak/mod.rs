//! Daily streak computation over a history of qualification flags.
//!
//! Everything here is a pure function of the snapshot passed in; fetching the
//! history and writing today's record back belong to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::activity::{ActivityRecord, ActivityValue, DateKey};
use crate::progress::TodayProgress;

#[cfg(test)]
mod streak_test;

/// Minimum checklist completion ratio for a day to count toward a streak.
pub const QUALIFYING_THRESHOLD: f64 = 0.75;

pub fn is_qualifying_ratio(ratio: f64) -> bool {
    ratio >= QUALIFYING_THRESHOLD
}

/// Whether a stored value makes its day count toward the streak.
///
/// Measurements (hours slept, minutes meditated) qualify when anything was
/// recorded at all.
pub fn is_qualifying_value(value: ActivityValue) -> bool {
    match value {
        ActivityValue::Ratio(ratio) => is_qualifying_ratio(ratio),
        ActivityValue::Measurement(amount) => amount > 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayCompletion {
    pub completed: bool,
}

impl DayCompletion {
    pub fn qualified() -> Self {
        Self { completed: true }
    }

    pub fn missed() -> Self {
        Self { completed: false }
    }
}

/// Date key → qualification flag. Ordered, so iteration is chronological.
pub type StreakHistory = BTreeMap<DateKey, DayCompletion>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub today_progress: TodayProgress,
    pub total_qualifying_days: u32,
    pub last_qualifying_day: Option<DateKey>,
}

impl StreakState {
    pub fn with_today_progress(mut self, progress: TodayProgress) -> Self {
        self.today_progress = progress;
        self
    }
}

fn qualifies(history: &StreakHistory, day: DateKey) -> bool {
    history.get(&day).is_some_and(|entry| entry.completed)
}

/// Current and longest streak as of `today`.
///
/// An unfinished (or not yet recorded) today never breaks the current streak;
/// counting then starts from yesterday. Any day missing from `history` counts
/// as not completed.
pub fn compute_streak(history: &StreakHistory, today: DateKey) -> StreakState {
    let mut cursor = if qualifies(history, today) {
        Some(today)
    } else {
        today.pred()
    };

    let mut current_streak = 0u32;
    while let Some(day) = cursor {
        if !qualifies(history, day) {
            break;
        }
        current_streak += 1;
        cursor = day.pred();
    }

    let mut running = 0u32;
    let mut scanned_longest = 0u32;
    let mut total_qualifying_days = 0u32;
    let mut last_qualifying_day = None;
    let mut prev_day: Option<DateKey> = None;

    for (day, entry) in history {
        if entry.completed {
            let contiguous = prev_day.is_some_and(|prev| prev.days_until(day) == 1);
            running = if contiguous { running + 1 } else { 1 };
            scanned_longest = scanned_longest.max(running);
            total_qualifying_days += 1;
            last_qualifying_day = Some(*day);
        } else {
            running = 0;
        }
        prev_day = Some(*day);
    }

    StreakState {
        current_streak,
        longest_streak: scanned_longest.max(current_streak),
        today_progress: TodayProgress::default(),
        total_qualifying_days,
        last_qualifying_day,
    }
}

/// Collapse stored records into a qualification history.
///
/// Duplicate date keys resolve to the most recently updated record.
pub fn history_from_records(records: &[ActivityRecord]) -> StreakHistory {
    let mut latest: BTreeMap<DateKey, (DateTime<Utc>, DayCompletion)> = BTreeMap::new();

    for record in records {
        let completion = DayCompletion {
            completed: is_qualifying_value(record.value()),
        };

        match latest.get(&record.date_key()) {
            Some((seen_at, _)) if *seen_at > record.updated_at() => {}
            _ => {
                latest.insert(record.date_key(), (record.updated_at(), completion));
            }
        }
    }

    latest
        .into_iter()
        .map(|(day, (_, completion))| (day, completion))
        .collect()
}
