use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::dtos::StreakDto;
use lifebalance_domain::activity::{
    ActivityKind, ActivityRecord, ActivityRepository, ActivityValue, DateKey, ReferenceTimezone,
};
use lifebalance_domain::progress::{compute_today_progress, Completable, TodayProgress};
use lifebalance_domain::shared::{DomainError, UserId};
use lifebalance_domain::streak::{compute_streak, history_from_records, DayCompletion};

/// Streaks over stored daily history, with today's checklist written back.
pub struct StreakService {
    repository: Arc<dyn ActivityRepository>,
    timezone: ReferenceTimezone,
}

impl StreakService {
    pub fn new(repository: Arc<dyn ActivityRepository>, timezone: ReferenceTimezone) -> Self {
        Self {
            repository,
            timezone,
        }
    }

    /// Recompute the checklist streak with today's items replacing whatever
    /// was stored for today, then persist today's ratio.
    ///
    /// Only the history read can fail the call. A failed write is logged and
    /// the computed streak is returned anyway.
    pub async fn refresh_checklist_streak<T>(
        &self,
        user_id: &UserId,
        items: &[T],
        now: DateTime<Utc>,
    ) -> Result<StreakDto, DomainError>
    where
        T: Completable + Sync,
    {
        let kind = ActivityKind::Checklist;
        let today = DateKey::from_instant(now, &self.timezone);
        let progress = compute_today_progress(items);

        // An empty checklist is stored as 0.0 so it overwrites an earlier qualifying entry
        let today_record = ActivityRecord::new(
            user_id.clone(),
            kind,
            today,
            ActivityValue::ratio(progress.ratio().unwrap_or(0.0))?,
        )?;

        let records = self.repository.get_history(user_id, kind).await?;
        let mut history = history_from_records(&records);
        history.insert(today, today_completion(&progress));

        let state = compute_streak(&history, today).with_today_progress(progress);

        if let Err(e) = self.repository.put_today_record(&today_record).await {
            warn!(
                user_id = %user_id,
                date_key = %today,
                error = %e,
                "Failed to persist today's checklist record"
            );
        }

        info!(
            user_id = %user_id,
            date_key = %today,
            completed = progress.completed,
            total = progress.total,
            current_streak = state.current_streak,
            longest_streak = state.longest_streak,
            "Checklist streak refreshed"
        );

        Ok(StreakDto::from_state(
            user_id,
            kind,
            &today.to_string(),
            &state,
        ))
    }

    /// Streak of any activity kind from stored history alone.
    pub async fn get_streak(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        now: DateTime<Utc>,
    ) -> Result<StreakDto, DomainError> {
        let today = DateKey::from_instant(now, &self.timezone);
        let records = self.repository.get_history(user_id, kind).await?;
        let history = history_from_records(&records);
        let state = compute_streak(&history, today);

        debug!(
            user_id = %user_id,
            activity_kind = %kind,
            records = records.len(),
            current_streak = state.current_streak,
            "Streak computed"
        );

        Ok(StreakDto::from_state(
            user_id,
            kind,
            &today.to_string(),
            &state,
        ))
    }
}

fn today_completion(progress: &TodayProgress) -> DayCompletion {
    DayCompletion {
        completed: progress.is_qualifying(),
    }
}
