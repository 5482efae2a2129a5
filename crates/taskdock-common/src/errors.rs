use std::path::PathBuf;

use crate::types::WindowHandle;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

/// Failures reported by the windowing-system binding.
///
/// These never roll back engine state: the dock mirrors the windowing
/// system's last known truth and only logs the failure.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("window {0} no longer exists")]
    WindowGone(WindowHandle),

    #[error("{action} failed for window {handle}: {reason}")]
    ActionFailed {
        action: &'static str,
        handle: WindowHandle,
        reason: String,
    },

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("application directory io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid desktop entry {path}: {reason}")]
    InvalidEntry { path: PathBuf, reason: String },

    #[error("failed to launch '{app}': {reason}")]
    LaunchFailed { app: String, reason: String },

    #[error("application directory watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TaskdockError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
