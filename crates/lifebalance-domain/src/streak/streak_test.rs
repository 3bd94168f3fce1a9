use chrono::{Duration, TimeZone, Utc};

use super::*;
use crate::activity::{ActivityKind, ActivityRecord, ActivityValue, DateKey};
use crate::shared::UserId;

fn day(s: &str) -> DateKey {
    DateKey::parse(s).unwrap()
}

fn history(entries: &[(&str, bool)]) -> StreakHistory {
    entries
        .iter()
        .map(|(d, completed)| {
            (
                day(d),
                DayCompletion {
                    completed: *completed,
                },
            )
        })
        .collect()
}

#[test]
fn test_empty_history_has_no_streak() {
    let state = compute_streak(&StreakHistory::new(), day("2024-05-04"));

    assert_eq!(state.current_streak, 0);
    assert_eq!(state.longest_streak, 0);
    assert_eq!(state.total_qualifying_days, 0);
    assert!(state.last_qualifying_day.is_none());
}

#[test]
fn test_single_qualifying_today() {
    let state = compute_streak(&history(&[("2024-05-04", true)]), day("2024-05-04"));

    assert_eq!(state.current_streak, 1);
    assert_eq!(state.longest_streak, 1);
}

#[test]
fn test_pending_today_does_not_break_streak() {
    let absent = history(&[
        ("2024-05-01", true),
        ("2024-05-02", true),
        ("2024-05-03", true),
    ]);
    assert_eq!(compute_streak(&absent, day("2024-05-04")).current_streak, 3);

    let unfinished = history(&[
        ("2024-05-01", true),
        ("2024-05-02", true),
        ("2024-05-03", true),
        ("2024-05-04", false),
    ]);
    let state = compute_streak(&unfinished, day("2024-05-04"));
    assert_eq!(state.current_streak, 3);
    assert_eq!(state.longest_streak, 3);
}

#[test]
fn test_missed_yesterday_resets_current() {
    let h = history(&[("2024-05-01", true), ("2024-05-02", true), ("2024-05-03", false)]);
    let state = compute_streak(&h, day("2024-05-04"));

    assert_eq!(state.current_streak, 0);
    assert_eq!(state.longest_streak, 2);
}

#[test]
fn test_gap_breaks_streak() {
    // today, today-1 qualify; today-2 missing; today-3 qualifies
    let h = history(&[
        ("2024-05-01", true),
        ("2024-05-03", true),
        ("2024-05-04", true),
    ]);
    let state = compute_streak(&h, day("2024-05-04"));

    assert_eq!(state.current_streak, 2);
    assert_eq!(state.longest_streak, 2);
    assert_eq!(state.total_qualifying_days, 3);
}

#[test]
fn test_longest_streak_from_past_run() {
    let h = history(&[
        ("2024-04-01", true),
        ("2024-04-02", true),
        ("2024-04-03", true),
        ("2024-04-04", true),
        ("2024-04-05", false),
        ("2024-05-03", true),
    ]);
    let state = compute_streak(&h, day("2024-05-04"));

    assert_eq!(state.current_streak, 1);
    assert_eq!(state.longest_streak, 4);
    assert_eq!(state.last_qualifying_day, Some(day("2024-05-03")));
}

#[test]
fn test_non_qualifying_entry_resets_running_count() {
    let h = history(&[
        ("2024-05-01", true),
        ("2024-05-02", false),
        ("2024-05-03", true),
        ("2024-05-04", true),
        ("2024-05-05", true),
    ]);
    let state = compute_streak(&h, day("2024-05-10"));

    assert_eq!(state.current_streak, 0);
    assert_eq!(state.longest_streak, 3);
}

#[test]
fn test_recompute_after_recording_day() {
    let mut h = history(&[
        ("2024-05-01", true),
        ("2024-05-02", true),
        ("2024-05-03", true),
    ]);

    let first = compute_streak(&h, day("2024-05-04"));
    assert_eq!(first.current_streak, 3);
    assert_eq!(first.longest_streak, 3);

    h.insert(day("2024-05-04"), DayCompletion::qualified());
    let second = compute_streak(&h, day("2024-05-05"));
    assert_eq!(second.current_streak, 4);
    assert_eq!(second.longest_streak, 4);
}

#[test]
fn test_longest_is_never_below_current() {
    let histories = [
        history(&[]),
        history(&[("2024-05-04", true)]),
        history(&[("2024-05-02", true), ("2024-05-03", false), ("2024-05-04", true)]),
        history(&[("2024-04-28", true), ("2024-04-29", true), ("2024-05-03", true)]),
        history(&[("2024-05-01", false), ("2024-05-02", false)]),
    ];

    for h in &histories {
        let state = compute_streak(h, day("2024-05-04"));
        assert!(state.longest_streak >= state.current_streak);
    }
}

#[test]
fn test_qualifying_threshold_boundary() {
    assert!(is_qualifying_ratio(0.75));
    assert!(is_qualifying_ratio(1.0));
    assert!(!is_qualifying_ratio(0.7499));
    assert!(is_qualifying_value(ActivityValue::Measurement(0.5)));
    assert!(!is_qualifying_value(ActivityValue::Measurement(0.0)));
}

#[test]
fn test_history_from_records_applies_threshold() {
    let user = UserId::from_string("user-1");
    let at = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
    let records = vec![
        ActivityRecord::restore(
            user.clone(),
            ActivityKind::Checklist,
            day("2024-05-02"),
            ActivityValue::Ratio(0.8),
            at,
        ),
        ActivityRecord::restore(
            user,
            ActivityKind::Checklist,
            day("2024-05-03"),
            ActivityValue::Ratio(0.5),
            at,
        ),
    ];

    let h = history_from_records(&records);
    assert_eq!(h.get(&day("2024-05-02")), Some(&DayCompletion::qualified()));
    assert_eq!(h.get(&day("2024-05-03")), Some(&DayCompletion::missed()));
}

#[test]
fn test_history_from_records_latest_update_wins() {
    let user = UserId::from_string("user-1");
    let earlier = Utc.with_ymd_and_hms(2024, 5, 3, 8, 0, 0).unwrap();
    let later = earlier + Duration::hours(4);

    // Newer record listed first: order in the slice must not matter
    let records = vec![
        ActivityRecord::restore(
            user.clone(),
            ActivityKind::Checklist,
            day("2024-05-03"),
            ActivityValue::Ratio(1.0),
            later,
        ),
        ActivityRecord::restore(
            user,
            ActivityKind::Checklist,
            day("2024-05-03"),
            ActivityValue::Ratio(0.25),
            earlier,
        ),
    ];

    let h = history_from_records(&records);
    assert_eq!(h.len(), 1);
    assert!(h[&day("2024-05-03")].completed);
}

#[test]
fn test_with_today_progress() {
    let state = compute_streak(&history(&[("2024-05-04", true)]), day("2024-05-04"))
        .with_today_progress(TodayProgress {
            completed: 3,
            total: 4,
        });

    assert_eq!(state.today_progress.completed, 3);
    assert_eq!(state.today_progress.total, 4);
    assert_eq!(state.current_streak, 1);
}
