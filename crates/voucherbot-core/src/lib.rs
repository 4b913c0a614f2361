mod app_config;
mod config;

pub use app_config::{AppConfig, ConfigError};
pub use config::{load_app_config, load_app_config_from_env};
