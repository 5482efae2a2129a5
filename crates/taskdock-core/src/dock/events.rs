//! Applying windowing-system events.

use taskdock_common::{Timestamp, WindowHandle};
use tracing::{debug, warn};

use crate::provider::WindowingEvent;

use super::batch::contract;
use super::Dock;

impl Dock {
    /// Apply one provider event as one batch.
    pub fn handle(&mut self, event: WindowingEvent) {
        debug!(?event, "windowing event");
        self.run_batch(|dock| match event {
            WindowingEvent::WindowOpened { window } => dock.adopt_window(window),
            WindowingEvent::WindowClosed { window } => dock.remove_window(window),
            WindowingEvent::ActiveWindowChanged { previous } => dock.update_active(previous),
            WindowingEvent::ClassChanged { window } => dock.rehome(window),
            WindowingEvent::StateChanged { window }
            | WindowingEvent::WorkspaceChanged { window }
            | WindowingEvent::MonitorsChanged {
                window: Some(window),
            } => dock.refresh_window(window),
            WindowingEvent::MonitorsChanged { window: None }
            | WindowingEvent::ActiveWorkspaceChanged => dock.reevaluate_all(),
            WindowingEvent::NameChanged { window } => dock.retitle(window),
        });
    }

    /// Sync the active flag with the provider. `previous` is the window the
    /// provider says lost activation, if it still knows.
    pub(super) fn update_active(&mut self, previous: Option<WindowHandle>) {
        let current = self
            .provider
            .active_window()
            .filter(|w| self.state.windows.contains(w));
        let stale = self.state.active;
        self.state.active = current;

        for window in [previous, stale].into_iter().flatten() {
            if Some(window) != current {
                self.deactivate(window);
            }
        }
        if let Some(window) = current {
            self.activate_binding(window);
        }
    }

    fn deactivate(&mut self, window: WindowHandle) {
        let Some(binding) = self.state.windows.get_mut(&window) else {
            debug!("deactivation of unknown window {window}");
            return;
        };
        if !binding.active {
            return;
        }
        binding.active = false;
        let Some(app) = binding.bound_group().cloned() else {
            return;
        };

        let active = self.state.active;
        if let Some(group) = self.state.groups.get_mut(&app) {
            group.set_active(active.is_some_and(|a| group.contains(a)));
        }
        self.batch.touched.insert(app);
    }

    fn activate_binding(&mut self, window: WindowHandle) {
        let Some(binding) = contract(self.state.windows.move_to_start(&window), "raise window")
        else {
            return;
        };
        if binding.active {
            return;
        }
        binding.active = true;
        let Some(app) = binding.bound_group().cloned() else {
            return;
        };

        if let Some(group) = self.state.groups.get_mut(&app) {
            group.set_active(true);
            group.set_top(window);
        }
        self.batch.touched.insert(app);
    }

    pub(super) fn activate_window(&self, window: WindowHandle, timestamp: Timestamp) {
        if let Err(e) = self.provider.activate(window, timestamp) {
            warn!("{e}");
        }
    }

    pub(super) fn minimize_window(&self, window: WindowHandle) {
        if let Err(e) = self.provider.minimize(window) {
            warn!("{e}");
        }
    }

    pub(super) fn close_window(&self, window: WindowHandle, timestamp: Timestamp) {
        if let Err(e) = self.provider.close(window, timestamp) {
            warn!("{e}");
        }
    }
}
