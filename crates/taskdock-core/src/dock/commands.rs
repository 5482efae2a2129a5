//! Executing UI commands.

use std::path::Path;

use taskdock_common::{Timestamp, WindowHandle};
use tracing::{debug, info, warn};

use crate::apps::AppKey;
use crate::commands::{ClickButton, CycleDirection, DockCommand};
use crate::group::Group;

use super::batch::contract;
use super::{Dock, MiddleClick};

impl Dock {
    /// Execute one user command as one batch.
    pub fn execute(&mut self, command: DockCommand) {
        debug!(?command, "dock command");
        self.run_batch(|dock| match command {
            DockCommand::Click {
                app,
                button,
                shift,
                timestamp,
            } => dock.click(&app, button, shift, timestamp),
            DockCommand::Scroll {
                app,
                direction,
                timestamp,
            } => dock.scroll(&app, direction, timestamp),
            DockCommand::ActivateSlot { index, timestamp } => dock.activate_slot(index, timestamp),
            DockCommand::SwitchToPrevious { timestamp } => dock.switch_to_previous(timestamp),
            DockCommand::CloseAll { app } => dock.close_all(&app, 0),
            DockCommand::SetPinned { app, pinned } => dock.set_pinned(&app, pinned),
            DockCommand::MoveGroup { moving, target } => dock.move_group(&moving, &target),
            DockCommand::Launch { app, action } => dock.launch(&app, action.as_deref()),
            DockCommand::SetOverride { identity, path } => dock.set_override(&identity, &path),
        });
    }

    fn click(&mut self, app: &AppKey, button: ClickButton, shift: bool, timestamp: Timestamp) {
        let Some(group) = self.state.groups.get(app) else {
            debug!("click on unknown group {app}");
            return;
        };

        if button == ClickButton::Middle {
            match self.state.options.middle_click {
                MiddleClick::CloseAll => self.close_all(app, timestamp),
                MiddleClick::LaunchNew => self.launch(app, None),
                MiddleClick::Nothing => {}
            }
            return;
        }

        if shift || (group.is_pinned() && group.is_empty()) {
            self.launch(app, None);
        } else if group.is_active() {
            let visible: Vec<WindowHandle> = group
                .members()
                .iter()
                .copied()
                .filter(|w| {
                    self.state
                        .windows
                        .get(w)
                        .is_some_and(|b| !b.state().is_minimized())
                })
                .collect();
            for window in visible {
                self.minimize_window(window);
            }
        } else {
            self.activate_group(group.activation_order(), timestamp);
        }
    }

    fn activate_group(&self, order: Vec<WindowHandle>, timestamp: Timestamp) {
        for window in order {
            self.activate_window(window, timestamp);
        }
    }

    fn scroll(&mut self, app: &AppKey, direction: CycleDirection, timestamp: Timestamp) {
        let Some(group) = self.state.groups.get_mut(app) else {
            debug!("scroll on unknown group {app}");
            return;
        };
        let before = group.top_index();
        let Some(target) = group.cycle(direction) else {
            return;
        };
        if group.top_index() != before {
            self.batch.touched.insert(app.clone());
        }
        self.activate_window(target, timestamp);
    }

    fn activate_slot(&mut self, index: usize, timestamp: Timestamp) {
        let Some((app, active, order)) = self
            .visible_groups()
            .get(index)
            .map(|g| (g.app().clone(), g.is_active(), g.activation_order()))
        else {
            debug!("no group in slot {index}");
            return;
        };

        if active {
            self.scroll(&app, CycleDirection::Backward, timestamp);
        } else if !order.is_empty() {
            self.activate_group(order, timestamp);
        } else {
            self.launch(&app, None);
        }
    }

    /// Activate the most recently used window before the current one,
    /// ignoring windows that are not listed in task lists.
    fn switch_to_previous(&self, timestamp: Timestamp) {
        let mut listed = self
            .state
            .windows
            .values()
            .filter(|b| b.state().is_listed())
            .map(|b| b.handle());
        // The first listed entry is the current window.
        listed.next();
        match listed.next() {
            Some(window) => self.activate_window(window, timestamp),
            None => debug!("no previous window to switch to"),
        }
    }

    fn close_all(&self, app: &AppKey, timestamp: Timestamp) {
        let Some(group) = self.state.groups.get(app) else {
            debug!("close-all on unknown group {app}");
            return;
        };
        for window in group.closable() {
            self.close_window(*window, timestamp);
        }
    }

    fn set_pinned(&mut self, app: &AppKey, pinned: bool) {
        if app.is_placeholder() {
            warn!("cannot pin {app}: it has no desktop entry");
            return;
        }

        if let Some(group) = self.state.groups.get_mut(app) {
            if group.is_pinned() == pinned {
                return;
            }
            group.set_pinned(pinned);
        } else if pinned {
            self.state.resolver.ensure_indexed(self.directory.as_ref());
            if self.state.resolver.application(app).is_none() {
                warn!("cannot pin unknown application {app}");
                return;
            }
            let group = Group::new(app.clone(), true);
            if contract(self.state.groups.push(app.clone(), group), "add pinned group").is_none() {
                return;
            }
            self.batch.structure_changed = true;
            self.batch.created.insert(app.clone());
        } else {
            debug!("unpin of unknown group {app}");
            return;
        }

        info!(app = %app, pinned, "pin state changed");
        self.batch.pins_changed = true;
        self.batch.touched.insert(app.clone());
    }

    fn move_group(&mut self, moving: &AppKey, target: &AppKey) {
        if moving == target {
            return;
        }
        if !self.state.groups.contains(moving) || !self.state.groups.contains(target) {
            debug!("move of {moving} onto {target}: unknown group");
            return;
        }
        if contract(
            self.state.groups.move_to_position_of(moving, target),
            "reorder groups",
        )
        .is_some()
        {
            self.batch.structure_changed = true;
            self.batch.pins_changed = true;
        }
    }

    fn launch(&mut self, app: &AppKey, action: Option<&str>) {
        self.state.resolver.ensure_indexed(self.directory.as_ref());
        let Some(application) = self.state.resolver.application(app) else {
            debug!("launch of unknown application {app}");
            return;
        };
        match self.directory.launch(application, action) {
            Ok(()) => info!(app = %app, ?action, "launched"),
            Err(e) => warn!("{e}"),
        }
    }

    fn set_override(&mut self, identity: &str, path: &Path) {
        let identity = identity.trim().to_lowercase();
        let Some(app) = self
            .state
            .resolver
            .add_override(&identity, path, self.directory.as_ref())
        else {
            warn!("could not use '{}' as launcher for '{identity}'", path.display());
            return;
        };
        info!(identity = %identity, app = %app, "launcher override set");
        self.batch.overrides_changed = true;

        let affected: Vec<WindowHandle> = self
            .state
            .windows
            .values()
            .filter(|b| b.identity() == identity)
            .map(|b| b.handle())
            .collect();
        for window in affected {
            self.rehome(window);
        }
    }
}
