use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::warn;
use sha2::{Digest, Sha256};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use lifebalance_domain::activity::{
    ActivityKind, ActivityRecord, ActivityRepository, ActivityValue, DateKey,
};
use lifebalance_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct ActivityRecordRow {
    user_id: String,
    activity_kind: String,
    date_key: String,
    value_kind: String,
    value: f64,
    updated_at: DateTime<Utc>,
}

impl ActivityRecordRow {
    fn try_into_record(self) -> Result<ActivityRecord, DomainError> {
        let kind: ActivityKind = self.activity_kind.parse().map_err(|e: DomainError| {
            DomainError::DataIntegrity(format!("Invalid activity_kind: {}", e.message()))
        })?;
        let date_key = DateKey::parse(&self.date_key).map_err(|e| {
            DomainError::DataIntegrity(format!("Invalid date_key: {}", e.message()))
        })?;
        let value = ActivityValue::from_parts(&self.value_kind, self.value)?;

        Ok(ActivityRecord::restore(
            UserId::from_string(&self.user_id),
            kind,
            date_key,
            value,
            self.updated_at,
        ))
    }
}

/// Same user, kind and day always hash to the same id, so a second write for
/// the day lands on the existing row.
pub fn record_id(user_id: &UserId, kind: ActivityKind, date_key: DateKey) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(kind.as_tag().as_bytes());
    hasher.update(b"|");
    hasher.update(date_key.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn into_records(rows: Vec<ActivityRecordRow>, user_id: &UserId) -> Vec<ActivityRecord> {
    rows.into_iter()
        .filter_map(|row| {
            let raw_date = row.date_key.clone();
            match row.try_into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        "[activity] skip invalid row user_id={} date_key={} err={}",
                        user_id, raw_date, e
                    );
                    None
                }
            }
        })
        .collect()
}

pub struct SqliteActivityRepository {
    base: SqliteRepositoryBase,
}

impl SqliteActivityRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ActivityRepository for SqliteActivityRepository {
    async fn get_history(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
    ) -> Result<Vec<ActivityRecord>, DomainError> {
        let query = r#"
            SELECT
                user_id,
                activity_kind,
                date_key,
                value_kind,
                value,
                updated_at
            FROM activity_records
            WHERE user_id = ?1 AND activity_kind = ?2
            ORDER BY date_key ASC
        "#;

        let rows: Vec<ActivityRecordRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(kind.as_tag()),
                "Get activity history",
            )
            .await?;

        Ok(into_records(rows, user_id))
    }

    async fn get_history_in_range(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<ActivityRecord>, DomainError> {
        let query = r#"
            SELECT
                user_id,
                activity_kind,
                date_key,
                value_kind,
                value,
                updated_at
            FROM activity_records
            WHERE user_id = ?1
              AND activity_kind = ?2
              AND date_key >= ?3
              AND date_key <= ?4
            ORDER BY date_key ASC
        "#;

        let rows: Vec<ActivityRecordRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(kind.as_tag())
                    .bind(start.to_string())
                    .bind(end.to_string()),
                "Get activity history in range",
            )
            .await?;

        Ok(into_records(rows, user_id))
    }

    async fn put_today_record(&self, record: &ActivityRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO activity_records (
                id,
                user_id,
                activity_kind,
                date_key,
                value_kind,
                value,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id, activity_kind, date_key) DO UPDATE SET
                value_kind = excluded.value_kind,
                value = excluded.value,
                updated_at = excluded.updated_at
        "#;

        let id = record_id(record.user_id(), record.kind(), record.date_key());

        self.base
            .execute(
                sqlx::query(query)
                    .bind(id)
                    .bind(record.user_id().as_str())
                    .bind(record.kind().as_tag())
                    .bind(record.date_key().to_string())
                    .bind(record.value().kind_tag())
                    .bind(record.value().as_f64())
                    .bind(record.updated_at()),
                "Put today activity record",
            )
            .await?;

        Ok(())
    }
}
