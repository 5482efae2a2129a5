//! System configuration types: application directory and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where desktop entries are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Searched after the XDG application directories.
    pub extra_dirs: Vec<PathBuf>,
    /// Rebuild groups when desktop entries change on disk.
    pub watch: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            extra_dirs: Vec::new(),
            watch: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The matching `tracing` filter directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
