//! Core types and constructors for Dock.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use taskdock_common::{MonitorId, Result, WindowHandle};

use crate::apps::{AppKey, AppResolver, Application, ApplicationDirectory, LauncherOverride};
use crate::group::Group;
use crate::provider::WindowingProvider;
use crate::store::OrderedKeyStore;
use crate::window::{VisibilityFilter, WindowBinding};

/// What a middle click on a group button does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MiddleClick {
    #[default]
    CloseAll,
    LaunchNew,
    Nothing,
}

/// Behavior switches, usually taken from the user's config.
///
/// `no_window_list_if_single` and `show_window_count` only shape how group
/// buttons are drawn. The engine stores them and hands them to the rendering
/// layer through [`Dock::options`]; grouping never reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockOptions {
    pub show_all_workspaces: bool,
    pub show_all_monitors: bool,
    pub middle_click: MiddleClick,
    /// Rendering hint: skip the window list for single-window groups.
    pub no_window_list_if_single: bool,
    /// Rendering hint: draw a member count on group buttons.
    pub show_window_count: bool,
}

impl Default for DockOptions {
    fn default() -> Self {
        Self {
            show_all_workspaces: true,
            show_all_monitors: true,
            middle_click: MiddleClick::CloseAll,
            no_window_list_if_single: false,
            show_window_count: false,
        }
    }
}

/// Persisted state the dock starts from.
#[derive(Debug, Clone, Default)]
pub struct DockSettings {
    pub options: DockOptions,
    /// Desktop entry ids of pinned groups, in button order.
    pub pinned: Vec<String>,
    pub overrides: Vec<LauncherOverride>,
}

/// Receives change notifications, at most one `groups_changed` per batch.
pub trait DockObserver {
    /// Groups were created, destroyed or reordered.
    fn groups_changed(&mut self);

    /// Something about one group's look changed: member count, active
    /// state, top window, a member's title or state.
    fn group_style_changed(&mut self, app: &AppKey);
}

/// Where pins and launcher overrides are written back to.
pub trait DockStore {
    fn save_pinned(&mut self, pinned: &[String]) -> Result<()>;
    fn save_overrides(&mut self, overrides: &[LauncherOverride]) -> Result<()>;
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DockObserver for NullObserver {
    fn groups_changed(&mut self) {}
    fn group_style_changed(&mut self, _app: &AppKey) {}
}

/// Store that persists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl DockStore for NullStore {
    fn save_pinned(&mut self, _pinned: &[String]) -> Result<()> {
        Ok(())
    }

    fn save_overrides(&mut self, _overrides: &[LauncherOverride]) -> Result<()> {
        Ok(())
    }
}

/// Everything the synchronization layer mutates.
pub(super) struct EngineState {
    /// Groups in button order.
    pub(super) groups: OrderedKeyStore<AppKey, Group>,
    /// Every live window, most recently active first.
    pub(super) windows: OrderedKeyStore<WindowHandle, WindowBinding>,
    pub(super) resolver: AppResolver,
    pub(super) options: DockOptions,
    pub(super) panel_monitor: Option<MonitorId>,
    pub(super) active: Option<WindowHandle>,
}

/// Work collected during one batch and flushed at its end.
#[derive(Debug, Default)]
pub(super) struct Batch {
    pub(super) structure_changed: bool,
    pub(super) pins_changed: bool,
    pub(super) overrides_changed: bool,
    pub(super) touched: BTreeSet<AppKey>,
    pub(super) created: BTreeSet<AppKey>,
}

/// The window-grouping engine.
///
/// Mirrors the provider's window list onto an ordered row of groups. Every
/// public entry point is one batch: state transitions run first, then
/// garbage groups are swept, changes are persisted, and observers are told
/// once.
pub struct Dock {
    pub(super) state: EngineState,
    pub(super) batch: Batch,
    pub(super) provider: Box<dyn WindowingProvider>,
    pub(super) directory: Box<dyn ApplicationDirectory>,
    pub(super) observer: Box<dyn DockObserver>,
    pub(super) store: Box<dyn DockStore>,
    pub(super) pinned_seed: Vec<String>,
}

impl Dock {
    pub fn new(
        provider: Box<dyn WindowingProvider>,
        directory: Box<dyn ApplicationDirectory>,
        observer: Box<dyn DockObserver>,
        store: Box<dyn DockStore>,
        settings: DockSettings,
    ) -> Self {
        Self {
            state: EngineState {
                groups: OrderedKeyStore::new(),
                windows: OrderedKeyStore::new(),
                resolver: AppResolver::new(settings.overrides),
                options: settings.options,
                panel_monitor: None,
                active: None,
            },
            batch: Batch::default(),
            provider,
            directory,
            observer,
            store,
            pinned_seed: settings.pinned,
        }
    }

    // -- Accessors --

    /// All groups in button order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.state.groups.values()
    }

    pub fn group(&self, app: &AppKey) -> Option<&Group> {
        self.state.groups.get(app)
    }

    /// Groups that have a button: pinned, or with at least one member.
    pub fn visible_groups(&self) -> Vec<&Group> {
        self.state
            .groups
            .values()
            .filter(|g| g.is_pinned() || g.member_count() > 0)
            .collect()
    }

    pub fn window(&self, window: WindowHandle) -> Option<&WindowBinding> {
        self.state.windows.get(&window)
    }

    /// Live windows, most recently active first.
    pub fn recency(&self) -> Vec<WindowHandle> {
        self.state.windows.keys().copied().collect()
    }

    pub fn application(&self, app: &AppKey) -> Option<&Application> {
        self.state.resolver.application(app)
    }

    pub fn active_window(&self) -> Option<WindowHandle> {
        self.state.active
    }

    pub fn options(&self) -> &DockOptions {
        &self.state.options
    }

    pub fn launcher_overrides(&self) -> &[LauncherOverride] {
        self.state.resolver.launcher_overrides()
    }

    /// Desktop entry ids of pinned groups, in button order.
    pub fn pinned_ids(&self) -> Vec<String> {
        self.state
            .groups
            .values()
            .filter(|g| g.is_pinned())
            .filter_map(|g| self.state.resolver.application(g.app()))
            .map(|app| app.id.clone())
            .collect()
    }

    pub(super) fn filter(&self) -> VisibilityFilter {
        VisibilityFilter {
            show_all_workspaces: self.state.options.show_all_workspaces,
            show_all_monitors: self.state.options.show_all_monitors,
            active_workspace: self.provider.active_workspace(),
            panel_monitor: self.state.panel_monitor,
            monitor_count: self.provider.monitor_count(),
        }
    }
}
