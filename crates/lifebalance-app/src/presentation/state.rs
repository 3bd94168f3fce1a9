use std::sync::Arc;

use crate::application::queries::CalendarQueries;
use crate::application::services::{
    ConfigService, GoalProgressService, StreakService, TrendService,
};
use lifebalance_domain::activity::ReferenceTimezone;

pub struct Runtime {
    pub timezone: ReferenceTimezone,
}

pub struct Services {
    pub config: Arc<ConfigService>,
    pub streak: Arc<StreakService>,
    pub trend: Arc<TrendService>,
    pub goal_progress: Arc<GoalProgressService>,
}

pub struct Queries {
    pub calendar: Arc<CalendarQueries>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub services: Services,
    pub queries: Queries,
}

impl AppState {
    /// Build from the platform config/data directories.
    pub async fn new() -> anyhow::Result<Self> {
        crate::presentation::bootstrap::build_default_app_state().await
    }
}
