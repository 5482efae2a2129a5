//! Per-window bindings and the eligibility filter that decides whether a
//! window is shown in its group.

use taskdock_common::{MonitorId, WindowHandle, WindowState, WorkspaceId};

use crate::apps::AppKey;
use crate::provider::WindowingProvider;

/// The dock's cached view of one live window.
#[derive(Debug, Clone)]
pub struct WindowBinding {
    pub(crate) handle: WindowHandle,
    pub(crate) state: WindowState,
    pub(crate) workspace: Option<WorkspaceId>,
    pub(crate) monitors: Vec<MonitorId>,
    pub(crate) title: String,
    /// Identity string the application was last resolved from.
    pub(crate) identity: String,
    pub(crate) app: AppKey,
    pub(crate) bound: bool,
    pub(crate) active: bool,
}

impl WindowBinding {
    /// Snapshot a window from the provider. The binding starts unbound and
    /// inactive.
    pub(crate) fn snapshot(
        handle: WindowHandle,
        identity: String,
        app: AppKey,
        provider: &dyn WindowingProvider,
    ) -> Self {
        Self {
            handle,
            state: provider.state(handle),
            workspace: provider.workspace(handle),
            monitors: provider.monitors(handle),
            title: provider.title(handle),
            identity,
            app,
            bound: false,
            active: false,
        }
    }

    /// Re-read the cached state. Returns true when anything changed.
    pub(crate) fn refresh(&mut self, provider: &dyn WindowingProvider) -> bool {
        let state = provider.state(self.handle);
        let workspace = provider.workspace(self.handle);
        let monitors = provider.monitors(self.handle);
        let changed =
            state != self.state || workspace != self.workspace || monitors != self.monitors;
        self.state = state;
        self.workspace = workspace;
        self.monitors = monitors;
        changed
    }

    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn workspace(&self) -> Option<WorkspaceId> {
        self.workspace
    }

    pub fn monitors(&self) -> &[MonitorId] {
        &self.monitors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Application the window was last resolved to, bound or not.
    pub fn app(&self) -> &AppKey {
        &self.app
    }

    /// The group this window is currently a member of.
    pub fn bound_group(&self) -> Option<&AppKey> {
        self.bound.then_some(&self.app)
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_eligible(&self, filter: &VisibilityFilter) -> bool {
        filter.admits(self.state, self.workspace, &self.monitors)
    }
}

/// Which windows the dock currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityFilter {
    pub show_all_workspaces: bool,
    pub show_all_monitors: bool,
    pub active_workspace: Option<WorkspaceId>,
    pub panel_monitor: Option<MonitorId>,
    pub monitor_count: usize,
}

impl VisibilityFilter {
    pub fn admits(
        &self,
        state: WindowState,
        workspace: Option<WorkspaceId>,
        monitors: &[MonitorId],
    ) -> bool {
        state.is_listed() && self.on_workspace(state, workspace) && self.on_monitor(monitors)
    }

    fn on_workspace(&self, state: WindowState, workspace: Option<WorkspaceId>) -> bool {
        if self.show_all_workspaces || state.contains(WindowState::STICKY) {
            return true;
        }
        match (workspace, self.active_workspace) {
            (Some(ws), Some(active)) => ws == active,
            _ => true,
        }
    }

    // Monitor filtering only means something with more than one monitor.
    fn on_monitor(&self, monitors: &[MonitorId]) -> bool {
        if self.show_all_monitors || self.monitor_count <= 1 || monitors.is_empty() {
            return true;
        }
        match self.panel_monitor {
            Some(panel) => monitors.contains(&panel),
            None => true,
        }
    }
}
