use serde::{Deserialize, Serialize};

use lifebalance_domain::aggregate::LifeDomainProgress;

/// Whole-number percentages per life domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeDomainProgressDto {
    pub mind: i64,
    pub body: i64,
    pub soul: i64,
}

impl From<LifeDomainProgress> for LifeDomainProgressDto {
    fn from(progress: LifeDomainProgress) -> Self {
        Self {
            mind: progress.mind,
            body: progress.body,
            soul: progress.soul,
        }
    }
}
