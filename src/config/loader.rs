use super::{AppConfig, ConfigError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the configuration directory.
pub const HOME_ENV: &str = "ORDER_RECONCILER_HOME";

pub const CONFIG_FILENAME: &str = "config.toml";

/// `$ORDER_RECONCILER_HOME`, or `~/.order-reconciler`.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => dirs::home_dir().map(|home| home.join(".order-reconciler")),
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The path was resolved but nothing exists there.
    Missing(PathBuf),
    /// No path was given and no home directory could be determined.
    Unresolved,
}

impl ConfigSource {
    /// Resolve `path`, or [`config_path`] when `None`.
    #[must_use]
    pub fn locate(path: Option<&Path>) -> Self {
        match path.map(Path::to_path_buf).or_else(config_path) {
            Some(path) if path.exists() => Self::File(path),
            Some(path) => Self::Missing(path),
            None => Self::Unresolved,
        }
    }

    /// Read the configuration; anything but an existing file yields the
    /// defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        match self {
            Self::File(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&content)?)
            }
            Self::Missing(_) | Self::Unresolved => Ok(AppConfig::default()),
        }
    }

    /// Record where the configuration came from. Call after logging is
    /// initialized.
    pub fn log(&self) {
        match self {
            Self::File(path) => debug!("Loaded config from {}", path.display()),
            Self::Missing(path) => {
                debug!("Config not found at {}; using defaults", path.display());
            }
            Self::Unresolved => warn!("Could not determine config directory; using defaults"),
        }
    }
}

/// Load configuration from `path`, or from [`config_path`] when `None`.
///
/// A file that does not exist yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let source = ConfigSource::locate(path);
    let config = source.load()?;
    source.log();
    Ok(config)
}
