use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::application::ResultExt;
use lifebalance_domain::shared::DomainError;
use lifebalance_domain::ReferenceTimezone;

pub const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "lifebalance";
const MAX_TREND_WINDOW_DAYS: u32 = 90;

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Persistent configuration, stored as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    /// Minutes east of UTC that decide where one day ends
    pub reference_utc_offset_minutes: i32,
    pub trend_window_days: u32,
    /// Relative to the data directory
    pub database_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            reference_utc_offset_minutes: 0,
            trend_window_days: 7,
            database_file: "lifebalance.db".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        ReferenceTimezone::from_offset_minutes(self.reference_utc_offset_minutes)?;

        if !(1..=MAX_TREND_WINDOW_DAYS).contains(&self.trend_window_days) {
            return Err(DomainError::Validation(format!(
                "trend_window_days must be between 1 and {}, got {}",
                MAX_TREND_WINDOW_DAYS, self.trend_window_days
            )));
        }

        if self.database_file.trim().is_empty() {
            return Err(DomainError::Validation(
                "database_file cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn reference_timezone(&self) -> Result<ReferenceTimezone, DomainError> {
        ReferenceTimezone::from_offset_minutes(self.reference_utc_offset_minutes)
    }
}

pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Application configuration service
///
/// Settings are read once at startup. `set_log_level` updates the stored
/// value and the config file, but the installed log filter only picks it up
/// on the next start, like every other saved change.
pub struct ConfigService {
    log_level: Arc<AtomicU8>,
    config: Mutex<AppConfig>,
    config_path: PathBuf,
}

impl ConfigService {
    /// Load `<config_dir>/config.json`, writing defaults when it is missing.
    /// An unreadable or invalid file falls back to defaults without being
    /// overwritten.
    pub fn load(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => config,
                    Err(e) => {
                        warn!(path = ?config_path, "Invalid config, using defaults: {}", e);
                        AppConfig::default()
                    }
                },
                Err(e) => {
                    warn!(path = ?config_path, "Unreadable config, using defaults: {}", e);
                    AppConfig::default()
                }
            }
        } else {
            let config = AppConfig::default();
            std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
            info!(path = ?config_path, "Default config written");
            config
        };

        info!("Config loaded from: {:?}", config_path);
        info!("Initial log level: {}", config.log_level.as_str());

        Ok(Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            config: Mutex::new(config),
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Settings as last loaded or saved
    pub fn snapshot(&self) -> Result<AppConfig, DomainError> {
        let config = self.config.lock().to_infra_err()?;
        Ok(config.clone())
    }

    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Set log level and persist to disk
    pub fn set_log_level(&self, level: LogLevel) -> Result<(), DomainError> {
        info!("Changing log level to: {}", level.as_str());
        self.log_level.store(level as u8, Ordering::Relaxed);

        let mut config = self.config.lock().to_infra_err()?;
        config.log_level = level;
        self.persist(&config)?;

        info!("Log level saved to: {:?}", self.config_path);
        Ok(())
    }

    /// Validate and persist a full configuration.
    pub fn update(&self, new_config: AppConfig) -> Result<(), DomainError> {
        new_config.validate()?;

        let mut config = self.config.lock().to_infra_err()?;
        self.persist(&new_config)?;
        self.log_level
            .store(new_config.log_level as u8, Ordering::Relaxed);
        *config = new_config;

        info!(
            path = ?self.config_path,
            "Config saved; timezone and trend window take effect on next start"
        );
        Ok(())
    }

    fn persist(&self, config: &AppConfig) -> Result<(), DomainError> {
        let content = serde_json::to_string_pretty(config).to_serialization_err("Encode config")?;
        std::fs::write(&self.config_path, content).to_infra_err()
    }
}
