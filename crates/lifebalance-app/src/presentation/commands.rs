//! String-typed entry points over `AppState`, the surface a UI shell binds to.
//! Inputs are parsed here; everything else is delegated.

use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::application::dtos::{CalendarDto, LifeDomainProgressDto, StreakDto, WindowTrendDto};
use crate::application::services::LogLevel;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use lifebalance_domain::activity::{ActivityKind, LifeDomain};
use lifebalance_domain::progress::ChecklistItem;
use lifebalance_domain::shared::UserId;

fn parse_user_id(user_id: &str) -> Result<UserId, CommandError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(CommandError::validation("user_id cannot be empty"));
    }
    Ok(UserId::from_string(trimmed))
}

fn parse_kind(kind: &str) -> Result<ActivityKind, CommandError> {
    kind.parse::<ActivityKind>().map_err(CommandError::from)
}

/// Recompute the checklist streak from today's items
pub async fn refresh_checklist_streak(
    user_id: String,
    items: Vec<ChecklistItem>,
    state: &AppState,
) -> Result<StreakDto, CommandError> {
    log::info!(
        "[streak] refresh_checklist_streak user_id={} items={}",
        user_id,
        items.len()
    );

    let user_id = parse_user_id(&user_id)?;
    let streak = state
        .services
        .streak
        .refresh_checklist_streak(&user_id, items.as_slice(), Utc::now())
        .await?;
    Ok(streak)
}

pub async fn get_streak(
    user_id: String,
    activity_kind: String,
    state: &AppState,
) -> Result<StreakDto, CommandError> {
    let user_id = parse_user_id(&user_id)?;
    let kind = parse_kind(&activity_kind)?;
    Ok(state
        .services
        .streak
        .get_streak(&user_id, kind, Utc::now())
        .await?)
}

pub async fn get_sleep_trend(
    user_id: String,
    state: &AppState,
) -> Result<WindowTrendDto, CommandError> {
    let user_id = parse_user_id(&user_id)?;
    Ok(state
        .services
        .trend
        .sleep_trend(&user_id, Utc::now())
        .await?)
}

pub async fn get_trend(
    user_id: String,
    activity_kind: String,
    state: &AppState,
) -> Result<WindowTrendDto, CommandError> {
    let user_id = parse_user_id(&user_id)?;
    let kind = parse_kind(&activity_kind)?;
    Ok(state.services.trend.trend(&user_id, kind, Utc::now()).await?)
}

pub async fn log_sleep(
    user_id: String,
    hours: f64,
    state: &AppState,
) -> Result<(), CommandError> {
    let user_id = parse_user_id(&user_id)?;
    state
        .services
        .trend
        .log_measurement(&user_id, ActivityKind::Sleep, hours, Utc::now())
        .await?;
    Ok(())
}

/// `goal_rows` is keyed by `mind`, `body` or `soul`; each value is that
/// domain's goal row as a JSON object.
pub async fn get_life_domain_progress(
    user_id: String,
    goal_rows: Map<String, Value>,
    state: &AppState,
) -> Result<LifeDomainProgressDto, CommandError> {
    let user_id = parse_user_id(&user_id)?;

    let mut rows = HashMap::new();
    for (key, value) in goal_rows {
        let domain = LifeDomain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == key)
            .ok_or_else(|| CommandError::invalid_input(format!("Unknown life domain: {}", key)))?;

        match value {
            Value::Object(row) => {
                rows.insert(domain, row);
            }
            _ => {
                return Err(CommandError::invalid_input(format!(
                    "Goal row for {} must be an object",
                    key
                )));
            }
        }
    }

    Ok(state
        .services
        .goal_progress
        .life_domain_progress(&user_id, &rows, Utc::now())
        .await?)
}

pub async fn get_calendar(
    user_id: String,
    activity_kind: String,
    year: i32,
    month: u32,
    state: &AppState,
) -> Result<CalendarDto, CommandError> {
    let user_id = parse_user_id(&user_id)?;
    let kind = parse_kind(&activity_kind)?;
    Ok(state
        .queries
        .calendar
        .month_stats(&user_id, kind, year, month)
        .await?)
}

pub async fn get_log_level(state: &AppState) -> Result<String, CommandError> {
    let level = state.services.config.get_log_level();
    Ok(level.as_str().to_string())
}

pub async fn set_log_level(level: String, state: &AppState) -> Result<(), CommandError> {
    let log_level = match level.to_lowercase().as_str() {
        "error" => LogLevel::Error,
        "warn" => LogLevel::Warn,
        "info" => LogLevel::Info,
        "debug" => LogLevel::Debug,
        "trace" => LogLevel::Trace,
        _ => {
            return Err(CommandError::validation(
                "Invalid log level. Must be one of: error, warn, info, debug, trace",
            ));
        }
    };

    state
        .services
        .config
        .set_log_level(log_level)
        .map_err(|e| CommandError::infrastructure(format!("Failed to save log level: {}", e)))?;
    Ok(())
}
