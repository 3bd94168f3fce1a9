use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::queries::CalendarQueries;
use crate::application::services::{
    default_config_dir, default_data_dir, ConfigService, GoalProgressService, StreakService,
    TrendService,
};
use crate::presentation::state::{AppState, Queries, Runtime, Services};
use lifebalance_domain::activity::ActivityRepository;
use lifebalance_infrastructure::logging::init_logger;
use lifebalance_infrastructure::persistence::{repositories::SqliteActivityRepository, Database};

pub async fn build_default_app_state() -> anyhow::Result<AppState> {
    let config_dir = default_config_dir().context("Failed to resolve config directory")?;
    let data_dir = default_data_dir().context("Failed to resolve data directory")?;
    build_app_state(&config_dir, &data_dir).await
}

/// Load config, start logging, open and migrate the database, then wire
/// repositories into services.
pub async fn build_app_state(config_dir: &Path, data_dir: &Path) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let config_service = Arc::new(ConfigService::load(config_dir)?);
    let config = config_service.snapshot()?;

    init_logger(data_dir.join("logs"), config.log_level.as_str())?;
    info!(
        config_path = ?config_service.config_path(),
        log_level = config.log_level.as_str(),
        "Config loaded"
    );

    let timezone = config.reference_timezone()?;
    info!(
        utc_offset_minutes = timezone.offset_minutes(),
        trend_window_days = config.trend_window_days,
        "Reference timezone resolved"
    );

    let db_path = data_dir.join(&config.database_file);
    let db_path_str = db_path.to_str().context("Invalid database path")?;
    info!("Database path: {}", db_path_str);

    let started_at = Instant::now();
    let database = Database::new(db_path_str).await?;
    database.run_migrations().await?;
    info!(
        "Database ready ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());
    let activity_repo =
        Arc::new(SqliteActivityRepository::new(pool)) as Arc<dyn ActivityRepository>;

    let streak_service = Arc::new(StreakService::new(activity_repo.clone(), timezone));
    let trend_service = Arc::new(TrendService::new(
        activity_repo.clone(),
        timezone,
        config.trend_window_days,
    ));
    let goal_progress_service = Arc::new(GoalProgressService::new(activity_repo.clone(), timezone));
    let calendar_queries = Arc::new(CalendarQueries::new(activity_repo));

    info!(
        "Startup complete ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime { timezone },
        services: Services {
            config: config_service,
            streak: streak_service,
            trend: trend_service,
            goal_progress: goal_progress_service,
        },
        queries: Queries {
            calendar: calendar_queries,
        },
    })
}
