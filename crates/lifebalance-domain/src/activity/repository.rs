use async_trait::async_trait;

use super::{ActivityKind, ActivityRecord, DateKey};
use crate::shared::{DomainError, UserId};

/// Persistence boundary for dated activity records.
///
/// The engine never calls this itself; application services fetch a history
/// snapshot, run the pure computations and write today's record back.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// All records of one kind for a user, in no guaranteed order.
    async fn get_history(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
    ) -> Result<Vec<ActivityRecord>, DomainError>;

    /// Records of one kind whose date key lies in `start..=end`.
    async fn get_history_in_range(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        start: DateKey,
        end: DateKey,
    ) -> Result<Vec<ActivityRecord>, DomainError>;

    /// Upsert keyed by `(user_id, kind, date_key)`; last write wins.
    async fn put_today_record(&self, record: &ActivityRecord) -> Result<(), DomainError>;
}
