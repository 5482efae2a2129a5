use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use taskdock_common::{MonitorId, WindowHandle, WindowState, WorkspaceId};

use super::*;
use crate::apps::{AppKey, Application, LauncherOverride, MemoryDirectory};
use crate::commands::{ClickButton, CycleDirection, DockCommand};
use crate::provider::memory::ProviderAction;
use crate::provider::{MemoryProvider, WindowIdentity, WindowSpec, WindowingEvent};

const W1: WindowHandle = WindowHandle(1);
const W2: WindowHandle = WindowHandle(2);
const W3: WindowHandle = WindowHandle(3);

const EDITOR_PATH: &str = "/usr/share/applications/editor.desktop";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Note {
    GroupsChanged,
    StyleChanged(AppKey),
}

#[derive(Clone, Default)]
struct Recorder {
    notes: Rc<RefCell<Vec<Note>>>,
}

impl Recorder {
    fn take(&self) -> Vec<Note> {
        std::mem::take(&mut *self.notes.borrow_mut())
    }
}

impl DockObserver for Recorder {
    fn groups_changed(&mut self) {
        self.notes.borrow_mut().push(Note::GroupsChanged);
    }

    fn group_style_changed(&mut self, app: &AppKey) {
        self.notes
            .borrow_mut()
            .push(Note::StyleChanged(app.clone()));
    }
}

#[derive(Clone, Default)]
struct Saved {
    pinned: Rc<RefCell<Vec<Vec<String>>>>,
    overrides: Rc<RefCell<Vec<Vec<LauncherOverride>>>>,
}

impl Saved {
    fn last_pinned(&self) -> Option<Vec<String>> {
        self.pinned.borrow().last().cloned()
    }
}

impl DockStore for Saved {
    fn save_pinned(&mut self, pinned: &[String]) -> taskdock_common::Result<()> {
        self.pinned.borrow_mut().push(pinned.to_vec());
        Ok(())
    }

    fn save_overrides(&mut self, overrides: &[LauncherOverride]) -> taskdock_common::Result<()> {
        self.overrides.borrow_mut().push(overrides.to_vec());
        Ok(())
    }
}

struct Harness {
    dock: Dock,
    provider: MemoryProvider,
    directory: MemoryDirectory,
    recorder: Recorder,
    saved: Saved,
}

impl Harness {
    fn build(options: DockOptions, pinned: &[&str]) -> Self {
        let provider = MemoryProvider::new();
        let directory = MemoryDirectory::new(catalog());
        let recorder = Recorder::default();
        let saved = Saved::default();
        let settings = DockSettings {
            options,
            pinned: pinned.iter().map(|s| s.to_string()).collect(),
            overrides: Vec::new(),
        };
        let dock = Dock::new(
            Box::new(provider.clone()),
            Box::new(directory.clone()),
            Box::new(recorder.clone()),
            Box::new(saved.clone()),
            settings,
        );
        Self {
            dock,
            provider,
            directory,
            recorder,
            saved,
        }
    }

    fn started(options: DockOptions, pinned: &[&str]) -> Self {
        let mut h = Self::build(options, pinned);
        h.dock.start();
        h.recorder.take();
        h
    }

    /// Feed queued provider events to the dock until none are left.
    fn pump(&mut self) {
        loop {
            let events = self.provider.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.dock.handle(event);
                assert_invariants(self);
            }
        }
    }

    fn open(&mut self, window: WindowHandle, class: &str) {
        self.open_spec(window, WindowSpec::new(class, "untitled"));
    }

    fn open_spec(&mut self, window: WindowHandle, spec: WindowSpec) {
        self.provider.open_window(window, spec);
        self.pump();
    }

    fn activate(&mut self, window: WindowHandle) {
        self.provider.set_active(Some(window));
        self.pump();
    }

    fn members(&self, id: &str) -> Vec<WindowHandle> {
        self.dock
            .group(&key(id))
            .map(|g| g.members().to_vec())
            .unwrap_or_default()
    }
}

/// Structural invariants that hold between batches.
fn assert_invariants(h: &Harness) {
    let dock = &h.dock;
    let filter = dock.filter();
    let mut seen = std::collections::HashSet::new();

    for group in dock.groups() {
        assert!(
            group.is_pinned() || !group.is_empty(),
            "orphan group {}",
            group.app()
        );
        for &window in group.members() {
            assert!(seen.insert(window), "{window} is in two groups");
            let binding = dock
                .window(window)
                .unwrap_or_else(|| panic!("member {window} has no binding"));
            assert_eq!(binding.bound_group(), Some(group.app()));
        }
        if !group.is_empty() {
            assert!(group.top().is_some_and(|top| group.contains(top)));
        }
        let holds_active = dock.active_window().is_some_and(|a| group.contains(a));
        assert_eq!(group.is_active(), holds_active, "active flag of {}", group.app());
    }

    let recency = dock.recency();
    for &window in &recency {
        let binding = dock.window(window).expect("recency entry has a binding");
        assert_eq!(binding.is_bound(), seen.contains(&window));
        assert_eq!(binding.is_bound(), binding.is_eligible(&filter), "{window} eligibility");
    }
    assert!(seen.iter().all(|w| recency.contains(w)), "member missing from recency");

    if let Some(active) = dock.active_window() {
        assert_eq!(recency.first(), Some(&active), "recency head");
    }
}

fn harness() -> Harness {
    Harness::started(DockOptions::default(), &[])
}

fn key(id: &str) -> AppKey {
    AppKey::entry(id)
}

fn catalog() -> Vec<Application> {
    vec![
        Application::new("firefox", "Firefox")
            .with_exec("firefox %u")
            .with_path("/usr/share/applications/firefox.desktop"),
        Application::new("gimp", "GIMP")
            .with_exec("gimp-2.10 %U")
            .with_path("/usr/share/applications/gimp.desktop"),
        Application::new("editor", "Editor")
            .with_path(EDITOR_PATH)
            .with_action("new-window", "New Window"),
    ]
}

fn identity(class: &str) -> WindowIdentity {
    WindowIdentity {
        class_ids: vec![class.to_string()],
        command_line: Vec::new(),
        title: String::new(),
    }
}

fn activations(provider: &MemoryProvider) -> Vec<WindowHandle> {
    provider
        .actions()
        .into_iter()
        .filter_map(|a| match a {
            ProviderAction::Activate { window, .. } => Some(window),
            _ => None,
        })
        .collect()
}

// -- Grouping --

#[test]
fn windows_of_one_application_share_a_group() {
    let mut h = harness();
    h.open(W1, "Firefox");
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);

    h.open(W2, "firefox");
    assert_eq!(h.recorder.take(), vec![Note::StyleChanged(key("firefox"))]);

    assert_eq!(h.members("firefox"), vec![W1, W2]);
    assert_eq!(h.dock.groups().count(), 1);
    assert_eq!(h.dock.window(W1).unwrap().bound_group(), Some(&key("firefox")));
}

#[test]
fn unknown_windows_share_a_placeholder_group() {
    let mut h = harness();
    h.open(W1, "mystery");
    h.open(W2, "Mystery");
    let placeholder = AppKey::Unresolved("mystery".into());
    assert_eq!(h.dock.group(&placeholder).unwrap().members(), &[W1, W2]);
    assert!(h.dock.application(&placeholder).unwrap().is_placeholder());
}

#[test]
fn class_change_rehomes_in_one_batch() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.recorder.take();

    h.provider.set_identity(W1, identity("gimp-2.10"));
    h.pump();

    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);
    assert!(h.dock.group(&key("firefox")).is_none());
    assert_eq!(h.members("gimp"), vec![W1]);
}

#[test]
fn class_change_to_same_application_is_quiet() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.recorder.take();

    h.provider.set_identity(W1, identity("FIREFOX"));
    h.pump();
    assert!(h.recorder.take().is_empty());
    assert_eq!(h.members("firefox"), vec![W1]);
}

#[test]
fn skip_tasklist_windows_are_tracked_but_not_grouped() {
    let mut h = harness();
    h.open_spec(
        W1,
        WindowSpec::new("firefox", "dialog").with_state(WindowState::SKIP_TASKLIST),
    );
    assert!(h.dock.window(W1).is_some());
    assert!(h.dock.group(&key("firefox")).is_none());
    assert!(h.recorder.take().is_empty());
}

// -- Eligibility --

fn strict_workspaces() -> DockOptions {
    DockOptions {
        show_all_workspaces: false,
        ..DockOptions::default()
    }
}

#[test]
fn workspace_round_trip_keeps_resolved_application() {
    let mut h = Harness::started(strict_workspaces(), &[]);
    h.provider.set_active_workspace(Some(WorkspaceId(1)));
    h.pump();
    h.open_spec(
        W1,
        WindowSpec::new("firefox", "a").on_workspace(WorkspaceId(1)),
    );
    assert_eq!(h.members("firefox"), vec![W1]);

    h.provider.set_workspace(W1, Some(WorkspaceId(2)));
    h.pump();
    let binding = h.dock.window(W1).unwrap();
    assert_eq!(binding.bound_group(), None);
    assert_eq!(binding.app(), &key("firefox"));
    assert!(h.dock.group(&key("firefox")).is_none());

    // A class change the dock never hears about must not matter on rebind.
    h.provider.set_identity(W1, identity("gimp-2.10"));
    h.provider.take_events();

    h.provider.set_workspace(W1, Some(WorkspaceId(1)));
    h.pump();
    assert_eq!(h.members("firefox"), vec![W1]);
    assert!(h.dock.group(&key("gimp")).is_none());
}

#[test]
fn active_workspace_switch_reevaluates_windows() {
    let mut h = Harness::started(strict_workspaces(), &[]);
    h.provider.set_active_workspace(Some(WorkspaceId(1)));
    h.pump();
    h.open_spec(
        W1,
        WindowSpec::new("firefox", "a").on_workspace(WorkspaceId(1)),
    );
    h.open_spec(
        W2,
        WindowSpec::new("gimp-2.10", "b").on_workspace(WorkspaceId(2)),
    );
    assert!(h.dock.group(&key("gimp")).is_none());

    h.provider.set_active_workspace(Some(WorkspaceId(2)));
    h.pump();
    assert!(h.dock.group(&key("firefox")).is_none());
    assert_eq!(h.members("gimp"), vec![W2]);
}

#[test]
fn sticky_windows_follow_every_workspace() {
    let mut h = Harness::started(strict_workspaces(), &[]);
    h.provider.set_active_workspace(Some(WorkspaceId(1)));
    h.pump();
    h.open_spec(
        W1,
        WindowSpec::new("firefox", "a")
            .on_workspace(WorkspaceId(2))
            .with_state(WindowState::STICKY),
    );
    assert_eq!(h.members("firefox"), vec![W1]);
}

#[test]
fn monitor_filter_applies_with_several_monitors() {
    let options = DockOptions {
        show_all_monitors: false,
        ..DockOptions::default()
    };
    let mut h = Harness::started(options, &[]);
    h.provider.set_monitor_count(2);
    h.pump();
    h.dock.set_panel_monitor(Some(MonitorId(0)));

    h.open_spec(
        W1,
        WindowSpec::new("firefox", "a").on_monitors(vec![MonitorId(1)]),
    );
    assert!(h.dock.group(&key("firefox")).is_none());

    h.dock.set_panel_monitor(Some(MonitorId(1)));
    assert_eq!(h.members("firefox"), vec![W1]);

    h.provider.set_monitors(W1, vec![MonitorId(0)]);
    h.pump();
    assert!(h.dock.group(&key("firefox")).is_none());
}

#[test]
fn repeated_state_change_is_idempotent() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.recorder.take();

    h.provider.set_state(W1, WindowState::empty());
    h.pump();
    assert!(h.recorder.take().is_empty());

    h.provider.set_state(W1, WindowState::MINIMIZED);
    h.pump();
    assert_eq!(h.recorder.take(), vec![Note::StyleChanged(key("firefox"))]);

    h.provider.set_state(W1, WindowState::MINIMIZED);
    h.pump();
    assert!(h.recorder.take().is_empty());
}

#[test]
fn workspace_switch_reports_state_picked_up_on_refresh() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.recorder.take();

    // The state notification is lost; the next full pass still sees it.
    h.provider.set_state(W1, WindowState::MINIMIZED);
    h.provider.take_events();
    h.provider.set_active_workspace(Some(WorkspaceId(1)));
    h.pump();

    assert_eq!(h.members("firefox"), vec![W1]);
    assert_eq!(h.recorder.take(), vec![Note::StyleChanged(key("firefox"))]);
}

#[test]
fn rendering_hints_pass_through_untouched() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");

    h.dock.set_options(DockOptions {
        no_window_list_if_single: true,
        show_window_count: true,
        ..DockOptions::default()
    });

    assert!(h.dock.options().no_window_list_if_single);
    assert!(h.dock.options().show_window_count);
    assert_eq!(h.members("firefox"), vec![W1, W2]);
    assert_invariants(&h);
}

#[test]
fn becoming_skip_tasklist_unbinds() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.provider.set_state(W1, WindowState::SKIP_TASKLIST);
    h.pump();
    assert!(h.dock.group(&key("firefox")).is_none());
    assert!(!h.dock.window(W1).unwrap().is_bound());
}

#[test]
fn option_reload_reevaluates_windows() {
    let mut h = harness();
    h.provider.set_active_workspace(Some(WorkspaceId(1)));
    h.pump();
    h.open_spec(
        W1,
        WindowSpec::new("firefox", "a").on_workspace(WorkspaceId(2)),
    );
    assert_eq!(h.members("firefox"), vec![W1]);
    h.recorder.take();

    h.dock.set_options(strict_workspaces());
    assert!(h.dock.group(&key("firefox")).is_none());
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);

    // Same options again: nothing to do.
    h.dock.set_options(strict_workspaces());
    assert!(h.recorder.take().is_empty());
}

#[test]
fn title_change_restyles_group() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.recorder.take();

    h.provider.set_title(W1, "Downloads");
    h.pump();
    assert_eq!(h.dock.window(W1).unwrap().title(), "Downloads");
    assert_eq!(h.recorder.take(), vec![Note::StyleChanged(key("firefox"))]);
}

// -- Activation and recency --

#[test]
fn recency_head_is_active_window() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.activate(W1);
    h.activate(W2);

    assert_eq!(h.dock.active_window(), Some(W2));
    assert_eq!(h.dock.recency(), vec![W2, W1]);
    assert!(h.dock.window(W2).unwrap().is_active());
    assert!(!h.dock.window(W1).unwrap().is_active());

    let group = h.dock.group(&key("firefox")).unwrap();
    assert!(group.is_active());
    assert_eq!(group.top(), Some(W2));

    // New windows never displace the active head.
    h.open(W3, "gimp-2.10");
    assert_eq!(h.dock.recency(), vec![W2, W3, W1]);
}

#[test]
fn activation_moves_between_groups() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "gimp-2.10");
    h.activate(W1);
    h.recorder.take();

    h.activate(W2);
    assert!(!h.dock.group(&key("firefox")).unwrap().is_active());
    assert!(h.dock.group(&key("gimp")).unwrap().is_active());
    assert_eq!(
        h.recorder.take(),
        vec![
            Note::StyleChanged(key("firefox")),
            Note::StyleChanged(key("gimp")),
        ]
    );
}

#[test]
fn activation_reported_before_open_is_applied() {
    let mut h = harness();
    h.provider.add_window(W1, WindowSpec::new("firefox", "a"));
    h.provider.set_active(Some(W1));
    h.provider.take_events();
    h.dock.handle(WindowingEvent::ActiveWindowChanged { previous: None });
    assert_eq!(h.dock.active_window(), None);

    h.dock.handle(WindowingEvent::WindowOpened { window: W1 });
    assert_eq!(h.dock.active_window(), Some(W1));
    assert!(h.dock.group(&key("firefox")).unwrap().is_active());
}

#[test]
fn closing_active_window_clears_active() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.activate(W1);

    h.provider.close_window(W1);
    h.pump();
    assert_eq!(h.dock.active_window(), None);
    assert_eq!(h.dock.recency(), vec![W2]);
    let group = h.dock.group(&key("firefox")).unwrap();
    assert!(!group.is_active());
    assert_eq!(group.members(), &[W2]);
}

#[test]
fn closing_top_window_elects_most_recent() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.open(W3, "firefox");
    h.activate(W1);
    h.activate(W3);
    h.activate(W2);

    h.provider.close_window(W2);
    h.pump();
    assert_eq!(h.dock.group(&key("firefox")).unwrap().top(), Some(W3));
}

#[test]
fn last_window_closed_removes_group() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.recorder.take();

    h.provider.close_window(W1);
    h.pump();
    assert!(h.dock.group(&key("firefox")).is_none());
    assert!(h.dock.window(W1).is_none());
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);
}

#[test]
fn events_for_unknown_windows_are_ignored() {
    let mut h = harness();
    let ghost = WindowHandle(99);
    h.dock.handle(WindowingEvent::StateChanged { window: ghost });
    h.dock.handle(WindowingEvent::WindowClosed { window: ghost });
    h.dock.handle(WindowingEvent::ClassChanged { window: ghost });
    h.dock.handle(WindowingEvent::NameChanged { window: ghost });
    h.dock.handle(WindowingEvent::ActiveWindowChanged {
        previous: Some(ghost),
    });
    assert!(h.recorder.take().is_empty());
    assert_eq!(h.dock.groups().count(), 0);
}

#[test]
fn duplicate_open_is_ignored() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.dock.handle(WindowingEvent::WindowOpened { window: W1 });
    assert_eq!(h.members("firefox"), vec![W1]);
    assert_eq!(h.dock.recency(), vec![W1]);
}

#[test]
fn start_adopts_existing_windows() {
    let mut h = Harness::build(DockOptions::default(), &["editor"]);
    h.provider.add_window(W1, WindowSpec::new("firefox", "a"));
    h.provider.add_window(W2, WindowSpec::new("gimp-2.10", "b"));
    h.provider.set_active(Some(W2));
    h.provider.take_events();

    h.dock.start();
    let order: Vec<&AppKey> = h.dock.groups().map(|g| g.app()).collect();
    assert_eq!(order, vec![&key("editor"), &key("firefox"), &key("gimp")]);
    assert_eq!(h.dock.active_window(), Some(W2));
    assert_eq!(h.dock.recency()[0], W2);
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);
}

// -- Cycling and switching --

#[test]
fn scrolling_cycles_and_wraps() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.open(W3, "firefox");
    h.activate(W1);
    h.provider.clear_actions();

    for _ in 0..3 {
        h.dock.execute(DockCommand::Scroll {
            app: key("firefox"),
            direction: CycleDirection::Forward,
            timestamp: 0,
        });
        h.pump();
    }
    assert_eq!(activations(&h.provider), vec![W2, W3, W1]);
    assert_eq!(h.dock.active_window(), Some(W1));

    h.dock.execute(DockCommand::Scroll {
        app: key("firefox"),
        direction: CycleDirection::Backward,
        timestamp: 0,
    });
    h.pump();
    assert_eq!(h.dock.active_window(), Some(W3));
}

#[test]
fn scrolling_inactive_group_raises_top() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.open(W3, "gimp-2.10");
    h.activate(W2);
    h.activate(W3);
    h.provider.clear_actions();

    h.dock.execute(DockCommand::Scroll {
        app: key("firefox"),
        direction: CycleDirection::Forward,
        timestamp: 0,
    });
    assert_eq!(activations(&h.provider), vec![W2]);
}

#[test]
fn switch_to_previous_skips_unlisted_windows() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open_spec(
        W2,
        WindowSpec::new("firefox", "dialog").with_state(WindowState::SKIP_TASKLIST),
    );
    h.open(W3, "gimp-2.10");
    h.activate(W1);
    h.activate(W3);
    h.activate(W2);
    assert_eq!(h.dock.recency(), vec![W2, W3, W1]);
    h.provider.clear_actions();

    h.dock.execute(DockCommand::SwitchToPrevious { timestamp: 7 });
    assert_eq!(
        h.provider.actions(),
        vec![ProviderAction::Activate {
            window: W1,
            timestamp: 7
        }]
    );
}

#[test]
fn switch_to_previous_with_one_window_does_nothing() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.activate(W1);
    h.provider.clear_actions();

    h.dock.execute(DockCommand::SwitchToPrevious { timestamp: 0 });
    assert!(h.provider.actions().is_empty());
}

// -- Clicks --

fn click(app: &str) -> DockCommand {
    DockCommand::Click {
        app: key(app),
        button: ClickButton::Primary,
        shift: false,
        timestamp: 0,
    }
}

#[test]
fn click_on_empty_pinned_group_launches() {
    let mut h = Harness::started(DockOptions::default(), &["editor"]);
    h.dock.execute(click("editor"));
    assert_eq!(h.directory.launched(), vec![("editor".to_string(), None)]);
}

#[test]
fn click_raises_then_minimizes() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");

    h.dock.execute(click("firefox"));
    assert_eq!(activations(&h.provider), vec![W2, W1]);
    h.pump();
    assert_eq!(h.dock.active_window(), Some(W1));
    h.provider.clear_actions();

    h.dock.execute(click("firefox"));
    assert_eq!(
        h.provider.actions(),
        vec![
            ProviderAction::Minimize { window: W1 },
            ProviderAction::Minimize { window: W2 },
        ]
    );
}

#[test]
fn click_on_active_group_skips_minimized_members() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open_spec(
        W2,
        WindowSpec::new("firefox", "b").with_state(WindowState::MINIMIZED),
    );
    h.activate(W1);
    h.provider.clear_actions();

    h.dock.execute(click("firefox"));
    assert_eq!(
        h.provider.actions(),
        vec![ProviderAction::Minimize { window: W1 }]
    );
}

#[test]
fn shift_click_launches_running_application() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.dock.execute(DockCommand::Click {
        app: key("firefox"),
        button: ClickButton::Primary,
        shift: true,
        timestamp: 0,
    });
    assert_eq!(h.directory.launched(), vec![("firefox".to_string(), None)]);
    assert!(h.provider.actions().is_empty());
}

fn middle_click(app: &str) -> DockCommand {
    DockCommand::Click {
        app: key(app),
        button: ClickButton::Middle,
        shift: false,
        timestamp: 3,
    }
}

#[test]
fn middle_click_closes_all_by_default() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.dock.execute(middle_click("firefox"));
    assert_eq!(
        h.provider.actions(),
        vec![
            ProviderAction::Close {
                window: W1,
                timestamp: 3
            },
            ProviderAction::Close {
                window: W2,
                timestamp: 3
            },
        ]
    );
    h.pump();
    assert!(h.dock.group(&key("firefox")).is_none());
}

#[test]
fn middle_click_follows_option() {
    let options = DockOptions {
        middle_click: MiddleClick::LaunchNew,
        ..DockOptions::default()
    };
    let mut h = Harness::started(options, &[]);
    h.open(W1, "firefox");
    h.dock.execute(middle_click("firefox"));
    assert_eq!(h.directory.launched(), vec![("firefox".to_string(), None)]);

    h.dock.set_options(DockOptions {
        middle_click: MiddleClick::Nothing,
        ..DockOptions::default()
    });
    h.dock.execute(middle_click("firefox"));
    assert!(h.provider.actions().is_empty());
    assert_eq!(h.directory.launched().len(), 1);
}

#[test]
fn failed_actions_do_not_change_state() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.provider.set_failing(true);

    h.dock.execute(click("firefox"));
    h.pump();
    assert_eq!(h.dock.active_window(), None);
    assert_eq!(h.members("firefox"), vec![W1]);
}

#[test]
fn slot_activation() {
    let mut h = Harness::started(DockOptions::default(), &["editor"]);
    h.open(W1, "firefox");

    h.dock.execute(DockCommand::ActivateSlot {
        index: 0,
        timestamp: 0,
    });
    assert_eq!(h.directory.launched(), vec![("editor".to_string(), None)]);

    h.dock.execute(DockCommand::ActivateSlot {
        index: 1,
        timestamp: 0,
    });
    assert_eq!(activations(&h.provider), vec![W1]);
    h.pump();
    assert!(h.dock.group(&key("firefox")).unwrap().is_active());

    h.dock.execute(DockCommand::ActivateSlot {
        index: 9,
        timestamp: 0,
    });
    assert_eq!(activations(&h.provider), vec![W1]);
}

#[test]
fn slot_on_active_group_cycles_backward() {
    let mut h = harness();
    h.open(W1, "firefox");
    h.open(W2, "firefox");
    h.open(W3, "firefox");
    h.activate(W1);
    h.provider.clear_actions();

    h.dock.execute(DockCommand::ActivateSlot {
        index: 0,
        timestamp: 0,
    });
    assert_eq!(activations(&h.provider), vec![W3]);
}

#[test]
fn launch_with_action() {
    let mut h = harness();
    h.dock.execute(DockCommand::Launch {
        app: key("editor"),
        action: Some("new-window".into()),
    });
    assert_eq!(
        h.directory.launched(),
        vec![("editor".to_string(), Some("new-window".to_string()))]
    );
}

#[test]
fn launching_a_placeholder_does_nothing() {
    let mut h = harness();
    h.open(W1, "mystery");
    h.dock.execute(DockCommand::Launch {
        app: AppKey::Unresolved("mystery".into()),
        action: None,
    });
    assert!(h.directory.launched().is_empty());
}

// -- Pinning and ordering --

#[test]
fn pinned_group_survives_without_windows() {
    let mut h = Harness::started(DockOptions::default(), &["editor"]);
    let group = h.dock.group(&key("editor")).unwrap();
    assert!(group.is_pinned());
    assert!(group.is_empty());
    assert_eq!(h.dock.visible_groups().len(), 1);

    h.open(W1, "editor");
    h.provider.close_window(W1);
    h.pump();
    assert!(h.dock.group(&key("editor")).is_some());
}

#[test]
fn unpinning_empty_group_destroys_it() {
    let mut h = Harness::started(DockOptions::default(), &["editor"]);
    h.dock.execute(DockCommand::SetPinned {
        app: key("editor"),
        pinned: false,
    });
    assert!(h.dock.group(&key("editor")).is_none());
    assert_eq!(h.saved.last_pinned(), Some(Vec::new()));
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);
}

#[test]
fn unpinning_running_group_keeps_it() {
    let mut h = Harness::started(DockOptions::default(), &["firefox"]);
    h.open(W1, "firefox");
    h.dock.execute(DockCommand::SetPinned {
        app: key("firefox"),
        pinned: false,
    });
    let group = h.dock.group(&key("firefox")).unwrap();
    assert!(!group.is_pinned());
    assert_eq!(group.members(), &[W1]);
    assert_eq!(h.saved.last_pinned(), Some(Vec::new()));
}

#[test]
fn placeholders_cannot_be_pinned() {
    let mut h = harness();
    h.open(W1, "mystery");
    let placeholder = AppKey::Unresolved("mystery".into());
    h.dock.execute(DockCommand::SetPinned {
        app: placeholder.clone(),
        pinned: true,
    });
    assert!(!h.dock.group(&placeholder).unwrap().is_pinned());
    assert!(h.saved.last_pinned().is_none());
}

#[test]
fn pinning_a_closed_application_creates_its_group() {
    let mut h = harness();
    h.dock.execute(DockCommand::SetPinned {
        app: key("gimp"),
        pinned: true,
    });
    assert!(h.dock.group(&key("gimp")).unwrap().is_pinned());
    assert_eq!(h.saved.last_pinned(), Some(vec!["gimp".to_string()]));
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);
}

#[test]
fn unknown_pinned_ids_are_skipped() {
    let h = Harness::started(DockOptions::default(), &["nonexistent", "firefox"]);
    assert_eq!(h.dock.pinned_ids(), vec!["firefox".to_string()]);
    assert!(h
        .dock
        .application(&AppKey::Unresolved("nonexistent".into()))
        .is_none());
}

#[test]
fn moving_groups_persists_pin_order() {
    let mut h = Harness::started(DockOptions::default(), &["firefox", "editor"]);
    h.dock.execute(DockCommand::MoveGroup {
        moving: key("editor"),
        target: key("firefox"),
    });
    assert_eq!(
        h.dock.pinned_ids(),
        vec!["editor".to_string(), "firefox".to_string()]
    );
    assert_eq!(
        h.saved.last_pinned(),
        Some(vec!["editor".to_string(), "firefox".to_string()])
    );
    assert_eq!(h.recorder.take(), vec![Note::GroupsChanged]);
}

#[test]
fn running_groups_line_up_after_pinned() {
    let mut h = Harness::started(DockOptions::default(), &["editor"]);
    h.open(W1, "gimp-2.10");
    h.open(W2, "firefox");
    let order: Vec<&AppKey> = h.dock.groups().map(|g| g.app()).collect();
    assert_eq!(order, vec![&key("editor"), &key("gimp"), &key("firefox")]);
}

// -- Directory changes and overrides --

#[test]
fn directory_change_rehomes_placeholder_windows() {
    let mut h = harness();
    h.open(W1, "newapp");
    let placeholder = AppKey::Unresolved("newapp".into());
    assert!(h.dock.group(&placeholder).is_some());

    h.directory.add_entry(Application::new("newapp", "New App"));
    h.dock.applications_changed();

    assert_eq!(h.members("newapp"), vec![W1]);
    assert!(h.dock.group(&placeholder).is_none());
    assert!(h.dock.application(&placeholder).is_none());
}

#[test]
fn directory_change_keeps_pins_and_active() {
    let mut h = Harness::started(DockOptions::default(), &["editor", "firefox"]);
    h.open(W1, "firefox");
    h.activate(W1);

    h.dock.applications_changed();
    assert_eq!(
        h.dock.pinned_ids(),
        vec!["editor".to_string(), "firefox".to_string()]
    );
    let group = h.dock.group(&key("firefox")).unwrap();
    assert!(group.is_active());
    assert_eq!(group.members(), &[W1]);
}

#[test]
fn override_rehomes_matching_windows() {
    let mut h = harness();
    h.open(W1, "weird-class");
    h.dock.execute(DockCommand::SetOverride {
        identity: "Weird-Class".into(),
        path: PathBuf::from(EDITOR_PATH),
    });

    assert_eq!(h.members("editor"), vec![W1]);
    assert!(h
        .dock
        .group(&AppKey::Unresolved("weird-class".into()))
        .is_none());
    let saved = h.saved.overrides.borrow();
    assert_eq!(
        saved.last().unwrap(),
        &vec![LauncherOverride {
            identity: "weird-class".into(),
            path: PathBuf::from(EDITOR_PATH),
        }]
    );
}

#[test]
fn override_with_unreadable_entry_is_ignored() {
    let mut h = harness();
    h.open(W1, "weird-class");
    h.dock.execute(DockCommand::SetOverride {
        identity: "weird-class".into(),
        path: PathBuf::from("/nowhere.desktop"),
    });
    assert!(h.saved.overrides.borrow().is_empty());
    assert!(h
        .dock
        .group(&AppKey::Unresolved("weird-class".into()))
        .is_some());
}
