//! The windowing-system seam: what the dock asks of the display server and
//! the change notifications it receives back.

use serde::{Deserialize, Serialize};
use taskdock_common::{
    MonitorId, ProviderError, Timestamp, WindowHandle, WindowState, WorkspaceId,
};

pub mod memory;
pub mod noop;

pub use memory::{MemoryProvider, ProviderAction, WindowSpec};
pub use noop::NoopProvider;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Raw metadata a window is matched to an application by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowIdentity {
    /// Declared class ids, most specific first (X11 `WM_CLASS`, Wayland
    /// `app_id`).
    #[serde(default)]
    pub class_ids: Vec<String>,
    /// Command line of the owning process.
    #[serde(default)]
    pub command_line: Vec<String>,
    #[serde(default)]
    pub title: String,
}

/// A change reported by the windowing system. Events can arrive in any
/// order and may name windows the dock has never seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowingEvent {
    WindowOpened { window: WindowHandle },
    WindowClosed { window: WindowHandle },
    ActiveWindowChanged { previous: Option<WindowHandle> },
    ClassChanged { window: WindowHandle },
    StateChanged { window: WindowHandle },
    WorkspaceChanged { window: WindowHandle },
    /// A window moved between monitors, or with `window: None`, the monitor
    /// layout itself changed.
    MonitorsChanged {
        #[serde(default)]
        window: Option<WindowHandle>,
    },
    ActiveWorkspaceChanged,
    NameChanged { window: WindowHandle },
}

/// Platform-agnostic access to the live window list.
///
/// Queries answer with the provider's current truth; a window that has gone
/// away answers with empty values. Actions may fail, and the dock never
/// rolls its own state back when they do.
pub trait WindowingProvider {
    fn windows(&self) -> Vec<WindowHandle>;
    fn active_window(&self) -> Option<WindowHandle>;

    fn identity(&self, window: WindowHandle) -> WindowIdentity;
    fn title(&self, window: WindowHandle) -> String;
    fn state(&self, window: WindowHandle) -> WindowState;
    /// `None` for sticky windows and windows not on any workspace.
    fn workspace(&self, window: WindowHandle) -> Option<WorkspaceId>;
    fn active_workspace(&self) -> Option<WorkspaceId>;
    fn monitors(&self, window: WindowHandle) -> Vec<MonitorId>;
    fn monitor_count(&self) -> usize;

    fn activate(&self, window: WindowHandle, timestamp: Timestamp) -> Result<()>;
    fn close(&self, window: WindowHandle, timestamp: Timestamp) -> Result<()>;
    fn minimize(&self, window: WindowHandle) -> Result<()>;
}
