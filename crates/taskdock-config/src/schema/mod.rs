//! Configuration schema types for Taskdock.
//!
//! All structs use `serde(default)` so partial configs work.

mod behavior;
mod system;

pub use behavior::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub behavior: BehaviorConfig,
    pub pinned: PinnedConfig,
    /// Manual identity-to-desktop-entry choices.
    pub launchers: Vec<LauncherConfig>,
    pub directory: DirectoryConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
