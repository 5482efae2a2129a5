//! Core TOML config loading: read from path or platform default.

use std::path::Path;

use taskdock_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::DockConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields take their defaults. Validation failures are logged and
/// the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<DockConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: DockConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform default path
/// (`~/.config/taskdock/config.toml` on Linux).
///
/// If the file does not exist, creates a default config file and returns
/// defaults.
pub fn load_default() -> Result<DockConfig, ConfigError> {
    let path = default_config_path()?;
    load_or_create(&path)
}

/// Load `path`, writing the documented default file first if it is missing.
pub(crate) fn load_or_create(path: &Path) -> Result<DockConfig, ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(path)?;
            Ok(DockConfig::default())
        }
        Err(e) => Err(e),
    }
}
