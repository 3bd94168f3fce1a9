use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dtos::{CalendarDayDto, CalendarDto};
use lifebalance_domain::activity::{ActivityKind, ActivityRepository, DateKey};
use lifebalance_domain::aggregate::{month_range, month_stats};
use lifebalance_domain::shared::{DomainError, UserId};
use lifebalance_domain::streak::history_from_records;

/// Read-only month views over stored activity history
pub struct CalendarQueries {
    repository: Arc<dyn ActivityRepository>,
}

impl CalendarQueries {
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }

    /// Every day of the month with its stored value, plus the month's
    /// completion rate.
    pub async fn month_stats(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        year: i32,
        month: u32,
    ) -> Result<CalendarDto, DomainError> {
        let (first_day, last_day) = month_range(year, month)?;

        let records = self
            .repository
            .get_history_in_range(user_id, kind, first_day, last_day)
            .await?;

        let month_label = format!("{:04}-{:02}", year, month);
        if records.is_empty() {
            warn!(
                "[streak] calendar query empty result user_id={} kind={} month={}",
                user_id, kind, month_label
            );
        } else {
            info!(
                "[streak] calendar query user_id={} kind={} month={} rows={}",
                user_id,
                kind,
                month_label,
                records.len()
            );
        }

        let history = history_from_records(&records);
        let stats = month_stats(&history, year, month)?;

        // Same tie rule as the qualification history: newest update wins
        let mut values: HashMap<DateKey, (DateTime<Utc>, f64)> = HashMap::new();
        for record in &records {
            match values.get(&record.date_key()) {
                Some((seen_at, _)) if *seen_at > record.updated_at() => {}
                _ => {
                    values.insert(
                        record.date_key(),
                        (record.updated_at(), record.value().as_f64()),
                    );
                }
            }
        }

        let mut days = Vec::with_capacity(stats.total_days as usize);
        let mut cursor = Some(first_day);
        while let Some(day) = cursor.filter(|day| *day <= last_day) {
            days.push(CalendarDayDto {
                date: day.to_string(),
                is_qualifying: history.get(&day).is_some_and(|entry| entry.completed),
                value: values.get(&day).map(|(_, value)| *value),
            });
            cursor = day.succ();
        }

        Ok(CalendarDto {
            user_id: user_id.as_str().to_string(),
            activity_kind: kind.as_tag(),
            year,
            month,
            days,
            month_stats: stats.into(),
        })
    }
}
