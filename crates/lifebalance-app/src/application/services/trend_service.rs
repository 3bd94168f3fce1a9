use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::dtos::{TrendDto, WindowTrendDto};
use lifebalance_domain::activity::{
    ActivityKind, ActivityRecord, ActivityRepository, ActivityValue, DateKey, ReferenceTimezone,
};
use lifebalance_domain::aggregate::{mean, trend_over_windows};
use lifebalance_domain::shared::{DomainError, UserId};

/// Window averages and week-over-week style trends for numeric series
pub struct TrendService {
    repository: Arc<dyn ActivityRepository>,
    timezone: ReferenceTimezone,
    window_days: u32,
}

impl TrendService {
    pub fn new(
        repository: Arc<dyn ActivityRepository>,
        timezone: ReferenceTimezone,
        window_days: u32,
    ) -> Self {
        Self {
            repository,
            timezone,
            window_days,
        }
    }

    pub async fn sleep_trend(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<WindowTrendDto, DomainError> {
        self.trend(user_id, ActivityKind::Sleep, now).await
    }

    /// Average of the current window and its trend against the previous
    /// window of equal length, for any activity kind.
    pub async fn trend(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        now: DateTime<Utc>,
    ) -> Result<WindowTrendDto, DomainError> {
        if self.window_days == 0 {
            return Err(DomainError::Validation(
                "Trend window must be at least one day".to_string(),
            ));
        }

        let today = DateKey::from_instant(now, &self.timezone);
        let window = self.window_days as u64;
        let current_start = days_before(today, window - 1)?;
        let previous_start = days_before(today, 2 * window - 1)?;

        let records = self
            .repository
            .get_history_in_range(user_id, kind, previous_start, today)
            .await?;

        let current_values: Vec<f64> = records
            .iter()
            .filter(|record| record.date_key() >= current_start)
            .map(|record| record.value().as_f64())
            .collect();

        let average = mean(&current_values);
        let trend = trend_over_windows(&records, today, self.window_days);

        debug!(
            user_id = %user_id,
            activity_kind = %kind,
            window_days = self.window_days,
            records = records.len(),
            has_trend = trend.is_some(),
            "Trend computed"
        );

        Ok(WindowTrendDto {
            user_id: user_id.as_str().to_string(),
            activity_kind: kind.as_tag(),
            window_days: self.window_days,
            start_date: current_start.to_string(),
            end_date: today.to_string(),
            average,
            trend: trend.map(TrendDto::from),
        })
    }

    /// Store today's amount for a measured activity (hours slept, ...).
    /// A second call on the same day replaces the first.
    pub async fn log_measurement(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let today = DateKey::from_instant(now, &self.timezone);
        let record = ActivityRecord::new(
            user_id.clone(),
            kind,
            today,
            ActivityValue::measurement(amount)?,
        )?;

        self.repository.put_today_record(&record).await?;

        info!(
            user_id = %user_id,
            activity_kind = %kind,
            date_key = %today,
            amount,
            "Measurement logged"
        );
        Ok(())
    }
}

fn days_before(day: DateKey, days: u64) -> Result<DateKey, DomainError> {
    day.checked_sub_days(days).ok_or_else(|| {
        DomainError::InvalidInput(format!("Date {} minus {} days is out of range", day, days))
    })
}
