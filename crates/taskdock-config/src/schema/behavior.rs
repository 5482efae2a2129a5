//! Dock behavior and pinning configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What a middle click on a group button does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MiddleClickAction {
    #[default]
    CloseAll,
    LaunchNew,
    Nothing,
}

/// Which windows are shown and how buttons react.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub show_all_workspaces: bool,
    pub show_all_monitors: bool,
    pub middle_click: MiddleClickAction,
    pub no_window_list_if_single: bool,
    pub show_window_count: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            show_all_workspaces: true,
            show_all_monitors: true,
            middle_click: MiddleClickAction::CloseAll,
            no_window_list_if_single: false,
            show_window_count: false,
        }
    }
}

/// Pinned groups, in button order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinnedConfig {
    /// Desktop entry ids, e.g. `firefox` for `firefox.desktop`.
    pub apps: Vec<String>,
}

/// One `[[launchers]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub identity: String,
    pub path: PathBuf,
}
