//! Scripted sessions: drive the dock from a JSON list of window changes
//! and user commands against an in-memory windowing system.

use std::fmt::Write as _;
use std::path::Path;

use serde::Deserialize;
use taskdock_common::{TaskdockError, WindowHandle, WindowState, WorkspaceId};
use taskdock_core::{
    ApplicationDirectory, Dock, DockCommand, DockSettings, MemoryProvider, NullStore,
    WindowIdentity, WindowSpec,
};
use tracing::{debug, warn};

use crate::bridge::LoggingObserver;

/// Upper bound on event rounds after one step; actions queue events
/// which the dock may answer with further actions.
const MAX_ROUNDS: usize = 32;

/// One scripted change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ReplayStep {
    Open {
        window: WindowHandle,
        #[serde(flatten)]
        spec: WindowSpec,
    },
    Close {
        window: WindowHandle,
    },
    Activate {
        window: Option<WindowHandle>,
    },
    SetIdentity {
        window: WindowHandle,
        identity: WindowIdentity,
    },
    SetTitle {
        window: WindowHandle,
        title: String,
    },
    SetState {
        window: WindowHandle,
        state: WindowState,
    },
    SetWorkspace {
        window: WindowHandle,
        workspace: Option<WorkspaceId>,
    },
    SetActiveWorkspace {
        workspace: Option<WorkspaceId>,
    },
    Command(DockCommand),
}

pub fn load_script(path: &Path) -> Result<Vec<ReplayStep>, TaskdockError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        TaskdockError::Other(format!("invalid replay script {}: {e}", path.display()))
    })
}

/// Run `steps` against a fresh dock and return it for inspection.
pub fn replay(
    steps: Vec<ReplayStep>,
    directory: Box<dyn ApplicationDirectory>,
    settings: DockSettings,
) -> Dock {
    let provider = MemoryProvider::new();
    let mut dock = Dock::new(
        Box::new(provider.clone()),
        directory,
        Box::new(LoggingObserver),
        Box::new(NullStore),
        settings,
    );
    dock.start();

    for (i, step) in steps.into_iter().enumerate() {
        debug!(step = i, ?step, "replaying");
        apply(step, &provider, &mut dock);
        pump(&provider, &mut dock);
    }
    dock
}

fn apply(step: ReplayStep, provider: &MemoryProvider, dock: &mut Dock) {
    match step {
        ReplayStep::Open { window, spec } => provider.open_window(window, spec),
        ReplayStep::Close { window } => provider.close_window(window),
        ReplayStep::Activate { window } => provider.set_active(window),
        ReplayStep::SetIdentity { window, identity } => provider.set_identity(window, identity),
        ReplayStep::SetTitle { window, title } => provider.set_title(window, &title),
        ReplayStep::SetState { window, state } => provider.set_state(window, state),
        ReplayStep::SetWorkspace { window, workspace } => provider.set_workspace(window, workspace),
        ReplayStep::SetActiveWorkspace { workspace } => provider.set_active_workspace(workspace),
        ReplayStep::Command(command) => dock.execute(command),
    }
}

fn pump(provider: &MemoryProvider, dock: &mut Dock) {
    for _ in 0..MAX_ROUNDS {
        let events = provider.take_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            dock.handle(event);
        }
    }
    warn!("events still pending after {MAX_ROUNDS} rounds");
}

/// One line per visible group, in button order.
pub fn render(dock: &Dock) -> String {
    let mut out = String::new();
    for group in dock.visible_groups() {
        let name = dock
            .application(group.app())
            .map(|app| app.name.as_str())
            .unwrap_or("?");
        let _ = write!(out, "{} ({name})", group.app());
        if group.is_pinned() {
            out.push_str(" pinned");
        }
        if group.is_active() {
            out.push_str(" active");
        }
        let members: Vec<String> = group
            .members()
            .iter()
            .map(|&w| {
                let title = dock.window(w).map(|b| b.title()).unwrap_or("");
                let marker = if group.top() == Some(w) { "*" } else { "" };
                format!("{marker}{w} \"{title}\"")
            })
            .collect();
        if !members.is_empty() {
            let _ = write!(out, ": {}", members.join(", "));
        }
        out.push('\n');
    }
    out
}
