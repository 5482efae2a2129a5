//! Taskdock configuration.
//!
//! TOML config with live reload and validation. Every section has
//! defaults, so a partial file (or no file at all) works.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use taskdock_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{} pinned apps", config.pinned.apps.len());
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{
    BehaviorConfig, DirectoryConfig, DockConfig, LauncherConfig, LogLevel, LoggingConfig,
    MiddleClickAction, PinnedConfig, CONFIG_SCHEMA_VERSION,
};
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::ConfigWatcher;

use taskdock_common::ConfigError;

/// Load config from the platform default path, creating a documented
/// default file if none exists, and validate it.
pub fn load_config() -> Result<DockConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
