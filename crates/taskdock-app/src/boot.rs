//! Turning the loaded config into what the dock starts from.

use taskdock_config::{BehaviorConfig, DockConfig, MiddleClickAction};
use taskdock_core::{DockOptions, DockSettings, LauncherOverride, MiddleClick};

pub fn dock_options(behavior: &BehaviorConfig) -> DockOptions {
    DockOptions {
        show_all_workspaces: behavior.show_all_workspaces,
        show_all_monitors: behavior.show_all_monitors,
        middle_click: match behavior.middle_click {
            MiddleClickAction::CloseAll => MiddleClick::CloseAll,
            MiddleClickAction::LaunchNew => MiddleClick::LaunchNew,
            MiddleClickAction::Nothing => MiddleClick::Nothing,
        },
        no_window_list_if_single: behavior.no_window_list_if_single,
        show_window_count: behavior.show_window_count,
    }
}

pub fn launcher_overrides(config: &DockConfig) -> Vec<LauncherOverride> {
    config
        .launchers
        .iter()
        .map(|l| LauncherOverride {
            identity: l.identity.clone(),
            path: l.path.clone(),
        })
        .collect()
}

pub fn dock_settings(config: &DockConfig) -> DockSettings {
    DockSettings {
        options: dock_options(&config.behavior),
        pinned: config.pinned.apps.clone(),
        overrides: launcher_overrides(config),
    }
}
