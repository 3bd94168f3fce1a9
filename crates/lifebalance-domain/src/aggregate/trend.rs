use serde::{Deserialize, Serialize};

use crate::activity::{ActivityRecord, DateKey};

/// Current-window average compared against the window before it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    pub average: f64,
    pub sample_count: u32,
    /// Whole-number magnitude of the change; direction is `is_increasing`.
    pub percent_change: f64,
    pub is_increasing: bool,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `None` means "not enough data yet": an empty window, or a previous
/// average of zero that leaves the percent change undefined.
pub fn compute_trend(current_window: &[f64], previous_window: &[f64]) -> Option<AggregateStat> {
    let current_avg = mean(current_window)?;
    let previous_avg = mean(previous_window)?;

    if previous_avg == 0.0 {
        return None;
    }

    let percent_change = (((current_avg - previous_avg) / previous_avg).abs() * 100.0).round();

    Some(AggregateStat {
        average: current_avg,
        sample_count: current_window.len() as u32,
        percent_change,
        is_increasing: current_avg > previous_avg,
    })
}

/// Trend of the last `window_days` days (ending at `today`) against the
/// `window_days` before them.
pub fn trend_over_windows(
    records: &[ActivityRecord],
    today: DateKey,
    window_days: u32,
) -> Option<AggregateStat> {
    if window_days == 0 {
        return None;
    }

    let window = window_days as i64;
    let mut current = Vec::new();
    let mut previous = Vec::new();

    for record in records {
        let age = record.date_key().days_until(&today);
        if (0..window).contains(&age) {
            current.push(record.value().as_f64());
        } else if (window..2 * window).contains(&age) {
            previous.push(record.value().as_f64());
        }
    }

    compute_trend(&current, &previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityKind, ActivityValue};
    use crate::shared::UserId;
    use chrono::Utc;

    fn sleep(date: &str, hours: f64) -> ActivityRecord {
        ActivityRecord::restore(
            UserId::from_string("user-1"),
            ActivityKind::Sleep,
            DateKey::parse(date).unwrap(),
            ActivityValue::Measurement(hours),
            Utc::now(),
        )
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[6.0, 8.0, 7.0]), Some(7.0));
    }

    #[test]
    fn test_empty_window_is_insufficient_data() {
        assert!(compute_trend(&[], &[1.0, 2.0, 3.0]).is_none());
        assert!(compute_trend(&[1.0], &[]).is_none());
    }

    #[test]
    fn test_zero_previous_average_is_insufficient_data() {
        assert!(compute_trend(&[5.0], &[0.0]).is_none());
    }

    #[test]
    fn test_increasing_trend() {
        let stat = compute_trend(&[8.0, 8.0], &[6.0, 6.0]).unwrap();

        assert_eq!(stat.average, 8.0);
        assert_eq!(stat.percent_change, 33.0);
        assert!(stat.is_increasing);
        assert_eq!(stat.sample_count, 2);
    }

    #[test]
    fn test_decreasing_trend_reports_magnitude() {
        let stat = compute_trend(&[6.0], &[8.0]).unwrap();

        assert_eq!(stat.percent_change, 25.0);
        assert!(!stat.is_increasing);
    }

    #[test]
    fn test_equal_averages_are_not_increasing() {
        let stat = compute_trend(&[7.0, 7.0], &[6.0, 8.0]).unwrap();

        assert_eq!(stat.percent_change, 0.0);
        assert!(!stat.is_increasing);
    }

    #[test]
    fn test_trend_over_weekly_windows() {
        let today = DateKey::parse("2024-05-14").unwrap();
        let records = vec![
            // current week: 05-08 ..= 05-14
            sleep("2024-05-14", 8.0),
            sleep("2024-05-10", 8.0),
            sleep("2024-05-08", 8.0),
            // previous week: 05-01 ..= 05-07
            sleep("2024-05-07", 6.0),
            sleep("2024-05-01", 6.0),
            // outside both windows
            sleep("2024-04-30", 1.0),
            sleep("2024-05-15", 1.0),
        ];

        let stat = trend_over_windows(&records, today, 7).unwrap();

        assert_eq!(stat.average, 8.0);
        assert_eq!(stat.sample_count, 3);
        assert_eq!(stat.percent_change, 33.0);
        assert!(stat.is_increasing);
    }

    #[test]
    fn test_trend_over_windows_without_previous_data() {
        let today = DateKey::parse("2024-05-14").unwrap();
        let records = vec![sleep("2024-05-13", 7.5)];

        assert!(trend_over_windows(&records, today, 7).is_none());
        assert!(trend_over_windows(&records, today, 0).is_none());
    }
}
