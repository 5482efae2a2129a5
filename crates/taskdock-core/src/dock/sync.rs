//! Window binding transitions and whole-dock rebuilds.

use taskdock_common::{MonitorId, WindowHandle};
use tracing::{debug, error, info, warn};

use crate::apps::identity_key;
use crate::group::Group;
use crate::window::WindowBinding;

use super::batch::contract;
use super::{Dock, DockOptions};

impl Dock {
    /// Seed pinned groups, adopt every window the provider already has,
    /// and pick up the current active window.
    pub fn start(&mut self) {
        self.run_batch(|dock| {
            let pinned = std::mem::take(&mut dock.pinned_seed);
            dock.seed_pinned(&pinned);
            for window in dock.provider.windows() {
                dock.adopt_window(window);
            }
            dock.update_active(None);
            dock.batch.structure_changed = true;
            info!(
                groups = dock.state.groups.len(),
                windows = dock.state.windows.len(),
                "dock started"
            );
        });
    }

    /// The set of installed applications changed: rebuild every index and
    /// every group.
    pub fn applications_changed(&mut self) {
        self.run_batch(|dock| {
            info!("application directory changed, rebuilding groups");
            let pinned = dock.pinned_ids();
            dock.state.resolver.invalidate();
            dock.rebuild(&pinned);
        });
    }

    /// Apply new behavior options, e.g. after a config reload.
    pub fn set_options(&mut self, options: DockOptions) {
        self.run_batch(|dock| {
            if dock.state.options == options {
                return;
            }
            dock.state.options = options;
            dock.reevaluate_all();
            dock.batch.structure_changed = true;
        });
    }

    /// The monitor the panel sits on, for the monitor filter.
    pub fn set_panel_monitor(&mut self, monitor: Option<MonitorId>) {
        self.run_batch(|dock| {
            if dock.state.panel_monitor == monitor {
                return;
            }
            dock.state.panel_monitor = monitor;
            dock.reevaluate_all();
        });
    }

    pub(super) fn seed_pinned(&mut self, ids: &[String]) {
        for id in ids {
            let app = self.state.resolver.resolve(id, self.directory.as_ref());
            if app.is_placeholder() {
                warn!("pinned application '{id}' not found, skipping");
                continue;
            }
            if let Some(group) = self.state.groups.get_mut(&app) {
                group.set_pinned(true);
                continue;
            }
            let group = Group::new(app.clone(), true);
            if contract(self.state.groups.push(app.clone(), group), "seed pinned group").is_some() {
                self.batch.structure_changed = true;
                self.batch.created.insert(app);
            }
        }
    }

    fn rebuild(&mut self, pinned: &[String]) {
        for binding in self.state.windows.values_mut() {
            binding.bound = false;
        }
        self.state.groups.clear();
        self.batch.structure_changed = true;
        self.seed_pinned(pinned);

        let windows: Vec<WindowHandle> = self.state.windows.keys().copied().collect();
        for window in windows {
            let Some(binding) = self.state.windows.get(&window) else {
                continue;
            };
            let app = self
                .state
                .resolver
                .resolve(&binding.identity, self.directory.as_ref());
            if let Some(binding) = self.state.windows.get_mut(&window) {
                binding.app = app;
            }
            self.reconcile(window);
        }
    }

    /// Track a window the dock has not seen before.
    pub(super) fn adopt_window(&mut self, window: WindowHandle) {
        if self.state.windows.contains(&window) {
            debug!("window {window} opened twice, ignoring");
            return;
        }

        let identity = identity_key(&self.provider.identity(window));
        let app = self.state.resolver.resolve(&identity, self.directory.as_ref());
        debug!(window = %window, identity = %identity, app = %app, "window opened");

        let binding = WindowBinding::snapshot(window, identity, app, self.provider.as_ref());
        if contract(self.state.windows.push_second(window, binding), "track window").is_none() {
            return;
        }
        self.reconcile(window);

        // The activation may have been reported before the window itself.
        if self.provider.active_window() == Some(window) && self.state.active != Some(window) {
            self.update_active(None);
        }
    }

    pub(super) fn remove_window(&mut self, window: WindowHandle) {
        if !self.state.windows.contains(&window) {
            debug!("close for unknown window {window}");
            return;
        }
        self.unbind_window(window);
        contract(self.state.windows.pop(&window), "forget closed window");
        if self.state.active == Some(window) {
            self.state.active = None;
        }
        debug!("window {window} closed");
    }

    /// Re-resolve a window whose class changed and move it to its new
    /// group if the application differs.
    pub(super) fn rehome(&mut self, window: WindowHandle) {
        if !self.state.windows.contains(&window) {
            debug!("class change for unknown window {window}");
            return;
        }
        let identity = identity_key(&self.provider.identity(window));
        let app = self.state.resolver.resolve(&identity, self.directory.as_ref());

        let Some(binding) = self.state.windows.get_mut(&window) else {
            return;
        };
        binding.identity = identity;
        if binding.app == app {
            return;
        }
        debug!(window = %window, from = %binding.app, to = %app, "window changed application");

        self.unbind_window(window);
        if let Some(binding) = self.state.windows.get_mut(&window) {
            binding.app = app;
        }
        self.reconcile(window);
    }

    /// Refresh a window's cached state and apply any eligibility change.
    pub(super) fn refresh_window(&mut self, window: WindowHandle) {
        let Some(binding) = self.state.windows.get_mut(&window) else {
            debug!("state change for unknown window {window}");
            return;
        };
        if !binding.refresh(self.provider.as_ref()) {
            return;
        }
        let bound_app = binding.bound_group().cloned();

        if !self.reconcile(window) {
            if let Some(app) = bound_app {
                self.batch.touched.insert(app);
            }
        }
    }

    pub(super) fn reevaluate_all(&mut self) {
        let windows: Vec<WindowHandle> = self.state.windows.keys().copied().collect();
        for window in windows {
            let Some(binding) = self.state.windows.get_mut(&window) else {
                continue;
            };
            let changed = binding.refresh(self.provider.as_ref());
            let bound_app = binding.bound_group().cloned();
            if !self.reconcile(window) && changed {
                if let Some(app) = bound_app {
                    self.batch.touched.insert(app);
                }
            }
        }
    }

    pub(super) fn retitle(&mut self, window: WindowHandle) {
        let Some(binding) = self.state.windows.get_mut(&window) else {
            debug!("title change for unknown window {window}");
            return;
        };
        let title = self.provider.title(window);
        if binding.title == title {
            return;
        }
        binding.title = title;
        if let Some(app) = binding.bound_group().cloned() {
            self.batch.touched.insert(app);
        }
    }

    /// Bind or unbind a window to match its eligibility. Returns true when
    /// a transition happened.
    pub(super) fn reconcile(&mut self, window: WindowHandle) -> bool {
        let filter = self.filter();
        let Some(binding) = self.state.windows.get(&window) else {
            return false;
        };
        match (binding.is_eligible(&filter), binding.bound) {
            (true, false) => {
                self.bind_window(window);
                true
            }
            (false, true) => {
                self.unbind_window(window);
                true
            }
            _ => false,
        }
    }

    fn bind_window(&mut self, window: WindowHandle) {
        let Some(binding) = self.state.windows.get_mut(&window) else {
            return;
        };
        binding.bound = true;
        let app = binding.app.clone();
        let active = binding.active;

        if !self.state.groups.contains(&app) {
            let group = Group::new(app.clone(), false);
            if contract(self.state.groups.push(app.clone(), group), "create group").is_none() {
                return;
            }
            debug!("group {app} created");
            self.batch.structure_changed = true;
            self.batch.created.insert(app.clone());
        }

        let Some(group) = self.state.groups.get_mut(&app) else {
            return;
        };
        let appeared = group.bind(window);
        if active {
            group.set_top(window);
            group.set_active(true);
        }
        if appeared {
            // Newly running applications line up after everything else.
            contract(self.state.groups.move_to_end(&app), "move group to end");
            self.batch.structure_changed = true;
        }
        self.batch.touched.insert(app);
    }

    fn unbind_window(&mut self, window: WindowHandle) {
        let Some(binding) = self.state.windows.get_mut(&window) else {
            return;
        };
        if !binding.bound {
            return;
        }
        binding.bound = false;
        let app = binding.app.clone();
        let active = self.state.active;

        let Some(group) = self.state.groups.get_mut(&app) else {
            error!("bound window {window} has no group {app}");
            return;
        };
        group.unbind(window, &self.state.windows);
        group.set_active(active.is_some_and(|a| group.contains(a)));
        if group.is_garbage() {
            self.batch.structure_changed = true;
        }
        self.batch.touched.insert(app);
    }
}
