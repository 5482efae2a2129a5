//! Scriptable in-memory WindowingProvider.
//!
//! Holds a window table behind a shared handle. Mutators and actions update
//! the table and queue the event a real display server would send, which
//! the host drains with [`MemoryProvider::take_events`] and feeds to the
//! dock. Every action is recorded.

use std::cell::RefCell;
use std::rc::Rc;

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use taskdock_common::{
    MonitorId, ProviderError, Timestamp, WindowHandle, WindowState, WorkspaceId,
};

use super::{Result, WindowIdentity, WindowingEvent, WindowingProvider};

/// Everything the provider knows about one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    pub identity: WindowIdentity,
    pub state: WindowState,
    pub workspace: Option<WorkspaceId>,
    pub monitors: Vec<MonitorId>,
}

impl WindowSpec {
    /// A window with a single class id and a title.
    pub fn new(class: &str, title: &str) -> Self {
        Self {
            identity: WindowIdentity {
                class_ids: vec![class.to_string()],
                command_line: Vec::new(),
                title: title.to_string(),
            },
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: WindowState) -> Self {
        self.state = state;
        self
    }

    pub fn on_workspace(mut self, workspace: WorkspaceId) -> Self {
        self.workspace = Some(workspace);
        self
    }

    pub fn on_monitors(mut self, monitors: Vec<MonitorId>) -> Self {
        self.monitors = monitors;
        self
    }
}

/// An action the dock asked the provider to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProviderAction {
    Activate {
        window: WindowHandle,
        timestamp: Timestamp,
    },
    Close {
        window: WindowHandle,
        timestamp: Timestamp,
    },
    Minimize {
        window: WindowHandle,
    },
}

#[derive(Debug)]
struct Inner {
    windows: LinkedHashMap<WindowHandle, WindowSpec>,
    active: Option<WindowHandle>,
    active_workspace: Option<WorkspaceId>,
    monitor_count: usize,
    events: Vec<WindowingEvent>,
    actions: Vec<ProviderAction>,
    failing: bool,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            windows: LinkedHashMap::new(),
            active: None,
            active_workspace: None,
            monitor_count: 1,
            events: Vec::new(),
            actions: Vec::new(),
            failing: false,
        }
    }
}

/// Clones share one window table.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window that already exists, without queueing an event.
    pub fn add_window(&self, window: WindowHandle, spec: WindowSpec) {
        self.inner.borrow_mut().windows.replace(window, spec);
    }

    pub fn open_window(&self, window: WindowHandle, spec: WindowSpec) {
        let mut inner = self.inner.borrow_mut();
        inner.windows.replace(window, spec);
        inner.events.push(WindowingEvent::WindowOpened { window });
    }

    pub fn close_window(&self, window: WindowHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.windows.remove(&window);
        inner.events.push(WindowingEvent::WindowClosed { window });
        if inner.active == Some(window) {
            inner.active = None;
            inner.events.push(WindowingEvent::ActiveWindowChanged {
                previous: Some(window),
            });
        }
    }

    pub fn set_active(&self, window: Option<WindowHandle>) {
        let mut inner = self.inner.borrow_mut();
        let previous = inner.active;
        if previous == window {
            return;
        }
        inner.active = window;
        inner
            .events
            .push(WindowingEvent::ActiveWindowChanged { previous });
    }

    pub fn set_identity(&self, window: WindowHandle, identity: WindowIdentity) {
        self.update(window, WindowingEvent::ClassChanged { window }, |spec| {
            spec.identity = identity;
        });
    }

    pub fn set_title(&self, window: WindowHandle, title: &str) {
        self.update(window, WindowingEvent::NameChanged { window }, |spec| {
            spec.identity.title = title.to_string();
        });
    }

    pub fn set_state(&self, window: WindowHandle, state: WindowState) {
        self.update(window, WindowingEvent::StateChanged { window }, |spec| {
            spec.state = state;
        });
    }

    pub fn set_workspace(&self, window: WindowHandle, workspace: Option<WorkspaceId>) {
        self.update(window, WindowingEvent::WorkspaceChanged { window }, |spec| {
            spec.workspace = workspace;
        });
    }

    pub fn set_monitors(&self, window: WindowHandle, monitors: Vec<MonitorId>) {
        let event = WindowingEvent::MonitorsChanged {
            window: Some(window),
        };
        self.update(window, event, |spec| spec.monitors = monitors);
    }

    pub fn set_active_workspace(&self, workspace: Option<WorkspaceId>) {
        let mut inner = self.inner.borrow_mut();
        inner.active_workspace = workspace;
        inner.events.push(WindowingEvent::ActiveWorkspaceChanged);
    }

    pub fn set_monitor_count(&self, count: usize) {
        let mut inner = self.inner.borrow_mut();
        inner.monitor_count = count;
        inner
            .events
            .push(WindowingEvent::MonitorsChanged { window: None });
    }

    /// Make every subsequent action fail with [`ProviderError::ActionFailed`].
    pub fn set_failing(&self, failing: bool) {
        self.inner.borrow_mut().failing = failing;
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&self) -> Vec<WindowingEvent> {
        std::mem::take(&mut self.inner.borrow_mut().events)
    }

    pub fn actions(&self) -> Vec<ProviderAction> {
        self.inner.borrow().actions.clone()
    }

    pub fn clear_actions(&self) {
        self.inner.borrow_mut().actions.clear();
    }

    pub fn spec(&self, window: WindowHandle) -> Option<WindowSpec> {
        self.inner.borrow().windows.get(&window).cloned()
    }

    fn update(&self, window: WindowHandle, event: WindowingEvent, f: impl FnOnce(&mut WindowSpec)) {
        let mut inner = self.inner.borrow_mut();
        if let Some(spec) = inner.windows.get_mut(&window) {
            f(spec);
            inner.events.push(event);
        }
    }

    fn check(&self, action: &'static str, window: WindowHandle) -> Result<()> {
        let inner = self.inner.borrow();
        if !inner.windows.contains_key(&window) {
            return Err(ProviderError::WindowGone(window));
        }
        if inner.failing {
            return Err(ProviderError::ActionFailed {
                action,
                handle: window,
                reason: "provider set to fail".into(),
            });
        }
        Ok(())
    }
}

impl WindowingProvider for MemoryProvider {
    fn windows(&self) -> Vec<WindowHandle> {
        self.inner.borrow().windows.keys().copied().collect()
    }

    fn active_window(&self) -> Option<WindowHandle> {
        self.inner.borrow().active
    }

    fn identity(&self, window: WindowHandle) -> WindowIdentity {
        self.spec(window).map(|s| s.identity).unwrap_or_default()
    }

    fn title(&self, window: WindowHandle) -> String {
        self.spec(window).map(|s| s.identity.title).unwrap_or_default()
    }

    fn state(&self, window: WindowHandle) -> WindowState {
        self.spec(window).map(|s| s.state).unwrap_or_default()
    }

    fn workspace(&self, window: WindowHandle) -> Option<WorkspaceId> {
        self.spec(window).and_then(|s| s.workspace)
    }

    fn active_workspace(&self) -> Option<WorkspaceId> {
        self.inner.borrow().active_workspace
    }

    fn monitors(&self, window: WindowHandle) -> Vec<MonitorId> {
        self.spec(window).map(|s| s.monitors).unwrap_or_default()
    }

    fn monitor_count(&self) -> usize {
        self.inner.borrow().monitor_count
    }

    fn activate(&self, window: WindowHandle, timestamp: Timestamp) -> Result<()> {
        self.check("activate", window)?;
        self.inner
            .borrow_mut()
            .actions
            .push(ProviderAction::Activate { window, timestamp });

        let minimized = self.state(window);
        if minimized.is_minimized() {
            self.set_state(window, minimized - WindowState::MINIMIZED);
        }
        self.set_active(Some(window));
        Ok(())
    }

    fn close(&self, window: WindowHandle, timestamp: Timestamp) -> Result<()> {
        self.check("close", window)?;
        self.inner
            .borrow_mut()
            .actions
            .push(ProviderAction::Close { window, timestamp });
        self.close_window(window);
        Ok(())
    }

    fn minimize(&self, window: WindowHandle) -> Result<()> {
        self.check("minimize", window)?;
        self.inner
            .borrow_mut()
            .actions
            .push(ProviderAction::Minimize { window });
        let state = self.state(window);
        self.set_state(window, state | WindowState::MINIMIZED);
        Ok(())
    }
}
