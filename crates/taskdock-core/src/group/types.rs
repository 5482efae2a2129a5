//! Core type for application groups.

use taskdock_common::WindowHandle;

use crate::apps::AppKey;

/// All bound windows of one application, shown as a single button.
///
/// Members are kept in bind order. Every member has already passed the
/// dock's eligibility filter, so none of them is flagged skip-tasklist and
/// the member count is the number of windows the button represents.
#[derive(Debug, Clone)]
pub struct Group {
    pub(super) app: AppKey,
    pub(super) pinned: bool,
    pub(super) members: Vec<WindowHandle>,
    pub(super) active: bool,
    /// Index into `members` of the window clicks and scrolls start from.
    pub(super) top_index: usize,
}

impl Group {
    pub fn new(app: AppKey, pinned: bool) -> Self {
        Self {
            app,
            pinned,
            members: Vec::new(),
            active: false,
            top_index: 0,
        }
    }

    pub fn app(&self) -> &AppKey {
        &self.app
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Whether the group holds the active window.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn members(&self) -> &[WindowHandle] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, window: WindowHandle) -> bool {
        self.members.contains(&window)
    }

    pub fn top_index(&self) -> usize {
        self.top_index
    }

    pub fn top(&self) -> Option<WindowHandle> {
        self.members.get(self.top_index).copied()
    }

    /// An unpinned group without members has nothing left to show.
    pub fn is_garbage(&self) -> bool {
        !self.pinned && self.members.is_empty()
    }

    /// Windows a close-all request applies to.
    pub fn closable(&self) -> &[WindowHandle] {
        &self.members
    }

    /// Raise order for a click: every other member, then the top one last
    /// so it ends up in front.
    pub fn activation_order(&self) -> Vec<WindowHandle> {
        let Some(top) = self.top() else {
            return Vec::new();
        };
        let mut order: Vec<WindowHandle> =
            self.members.iter().copied().filter(|w| *w != top).collect();
        order.push(top);
        order
    }
}
