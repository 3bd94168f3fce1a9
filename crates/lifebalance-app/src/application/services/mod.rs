mod config_service;
mod goal_progress_service;
mod streak_service;
mod trend_service;


pub use config_service::{
    default_config_dir, default_data_dir, AppConfig, ConfigService, LogLevel, CONFIG_FILE_NAME,
};
pub use goal_progress_service::GoalProgressService;
pub use streak_service::StreakService;
pub use trend_service::TrendService;
