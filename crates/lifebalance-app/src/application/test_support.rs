use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

use lifebalance_domain::activity::{
    ActivityKind, ActivityRecord, ActivityRepository, ActivityValue, DateKey,
};
use lifebalance_domain::shared::{DomainError, UserId};

type RecordKey = (String, String, DateKey);

/// Upserting in-memory repository
pub struct InMemoryActivityRepository {
    records: tokio::sync::RwLock<HashMap<RecordKey, ActivityRecord>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self {
            records: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    pub async fn seed(&self, user: &UserId, kind: ActivityKind, date: &str, value: ActivityValue) {
        let record = ActivityRecord::new(user.clone(), kind, day(date), value).unwrap();
        self.put_today_record(&record).await.unwrap();
    }

    pub async fn get(&self, user: &UserId, kind: ActivityKind, date: &str) -> Option<ActivityRecord> {
        let records = self.records.read().await;
        records
            .get(&(user.as_str().to_string(), kind.as_tag(), day(date)))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn get_history(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
    ) -> Result<Vec<ActivityRecord>, DomainError> {
        let records = self.records.read().await;
        let mut history: Vec<ActivityRecord> = records
            .values()
            .filter(|r| r.user_id() == user_id && r.kind() == kind)
            .cloned()
            .collect();
        history.sort_by_key(|r| r.date_key());
        Ok(history)
    }

    async fn get_history_in_range(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<ActivityRecord>, DomainError> {
        let history = self.get_history(user_id, kind).await?;
        Ok(history
            .into_iter()
            .filter(|r| r.date_key() >= start && r.date_key() <= end)
            .collect())
    }

    async fn put_today_record(&self, record: &ActivityRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(
            (
                record.user_id().as_str().to_string(),
                record.kind().as_tag(),
                record.date_key(),
            ),
            record.clone(),
        );
        Ok(())
    }
}

mockall::mock! {
    pub ActivityRepo {}

    #[async_trait]
    impl ActivityRepository for ActivityRepo {
        async fn get_history(
            &self,
            user_id: &UserId,
            kind: ActivityKind,
        ) -> Result<Vec<ActivityRecord>, DomainError>;

        async fn get_history_in_range(
            &self,
            user_id: &UserId,
            kind: ActivityKind,
            start: DateKey,
            end: DateKey,
        ) -> Result<Vec<ActivityRecord>, DomainError>;

        async fn put_today_record(&self, record: &ActivityRecord) -> Result<(), DomainError>;
    }
}

pub fn day(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

/// Noon UTC on the given day
pub fn noon(date: &str) -> DateTime<Utc> {
    let d = day(date).date();
    Utc.from_utc_datetime(&d.and_hms_opt(12, 0, 0).unwrap())
}

pub fn ratio(value: f64) -> ActivityValue {
    ActivityValue::ratio(value).unwrap()
}

pub fn hours(value: f64) -> ActivityValue {
    ActivityValue::measurement(value).unwrap()
}
