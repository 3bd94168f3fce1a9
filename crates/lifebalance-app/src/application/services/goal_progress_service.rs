use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::dtos::LifeDomainProgressDto;
use lifebalance_domain::activity::{
    ActivityKind, ActivityRecord, ActivityRepository, ActivityValue, DateKey, LifeDomain,
    ReferenceTimezone,
};
use lifebalance_domain::aggregate::life_domain_progress;
use lifebalance_domain::shared::{DomainError, UserId};

/// Mind/Body/Soul goal percentages.
///
/// Each domain's average is also stored as today's `goal:<domain>` ratio so
/// the goal series can feed streaks and trends. That write is best-effort.
pub struct GoalProgressService {
    repository: Arc<dyn ActivityRepository>,
    timezone: ReferenceTimezone,
}

impl GoalProgressService {
    pub fn new(repository: Arc<dyn ActivityRepository>, timezone: ReferenceTimezone) -> Self {
        Self {
            repository,
            timezone,
        }
    }

    pub async fn life_domain_progress(
        &self,
        user_id: &UserId,
        goal_rows: &HashMap<LifeDomain, Map<String, Value>>,
        now: DateTime<Utc>,
    ) -> Result<LifeDomainProgressDto, DomainError> {
        let progress = life_domain_progress(goal_rows);
        let today = DateKey::from_instant(now, &self.timezone);

        for domain in LifeDomain::ALL {
            if !goal_rows.contains_key(&domain) {
                continue;
            }

            let percent = progress.get(domain);
            let record = ActivityRecord::new(
                user_id.clone(),
                ActivityKind::Goal(domain),
                today,
                ActivityValue::ratio(percent as f64 / 100.0)?,
            )?;

            if let Err(e) = self.repository.put_today_record(&record).await {
                warn!(
                    user_id = %user_id,
                    domain = domain.as_str(),
                    error = %e,
                    "Failed to persist goal progress"
                );
            }
        }

        info!(
            user_id = %user_id,
            mind = progress.mind,
            body = progress.body,
            soul = progress.soul,
            "Life domain progress computed"
        );

        Ok(progress.into())
    }
}
