//! Input the rendering layer forwards to the dock.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use taskdock_common::Timestamp;

use crate::apps::AppKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickButton {
    Primary,
    Middle,
}

/// Direction of a scroll over a group button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// A user interaction with the group row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DockCommand {
    Click {
        app: AppKey,
        button: ClickButton,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        timestamp: Timestamp,
    },
    Scroll {
        app: AppKey,
        direction: CycleDirection,
        #[serde(default)]
        timestamp: Timestamp,
    },
    /// Keyboard shortcut for the Nth visible group, zero-based.
    ActivateSlot {
        index: usize,
        #[serde(default)]
        timestamp: Timestamp,
    },
    SwitchToPrevious {
        #[serde(default)]
        timestamp: Timestamp,
    },
    CloseAll {
        app: AppKey,
    },
    SetPinned {
        app: AppKey,
        pinned: bool,
    },
    /// Result of a drag and drop: `moving` takes the place of `target`.
    MoveGroup {
        moving: AppKey,
        target: AppKey,
    },
    Launch {
        app: AppKey,
        #[serde(default)]
        action: Option<String>,
    },
    /// Bind windows with `identity` to the desktop entry at `path`.
    SetOverride {
        identity: String,
        path: PathBuf,
    },
}
