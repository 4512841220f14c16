mod init;

pub use init::{init_logging, parse_level, parse_rotation};

use crate::config::{config_dir, LoggingConfig};
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename inside the log directory.
pub const LOG_FILENAME: &str = "order-reconciler.log";

/// Resolved logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            log_dir: config.dir.clone().unwrap_or_else(default_log_dir),
            log_level: parse_level(&config.level),
            json_format: config.json,
            rotation: parse_rotation(&config.rotation),
        }
    }
}

fn default_log_dir() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
