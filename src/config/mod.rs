//! Optional user configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or an empty table is valid.

mod loader;

pub use loader::{config_dir, config_path, load_config, ConfigSource, CONFIG_FILENAME, HOME_ENV};

use crate::reorder::ReconcilerSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// `[logging]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set.
    pub level: String,
    pub json: bool,
    /// `daily`, `hourly` or `never`.
    pub rotation: String,
    /// Defaults to `logs/` under the config directory.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            rotation: "daily".to_string(),
            dir: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub reconciler: ReconcilerSettings,
    pub logging: LoggingConfig,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
