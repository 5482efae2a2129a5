//! Mutating operations on Group: bind, unbind, top election, cycling.

use taskdock_common::WindowHandle;

use super::Group;
use crate::commands::CycleDirection;
use crate::store::OrderedKeyStore;

impl Group {
    /// Add a window. Returns true when this is the first member of an
    /// unpinned group, i.e. the group just became visible.
    pub fn bind(&mut self, window: WindowHandle) -> bool {
        if self.members.contains(&window) {
            return false;
        }
        let appeared = self.members.is_empty() && !self.pinned;
        if self.members.is_empty() {
            self.top_index = 0;
        }
        self.members.push(window);
        appeared
    }

    /// Remove a window. The top window stays the same when an earlier
    /// member leaves; when the top window itself leaves the most recently
    /// active remaining member takes over.
    pub fn unbind<V>(
        &mut self,
        window: WindowHandle,
        recency: &OrderedKeyStore<WindowHandle, V>,
    ) -> bool {
        let Some(index) = self.members.iter().position(|w| *w == window) else {
            return false;
        };
        self.members.remove(index);

        if index < self.top_index {
            self.top_index -= 1;
        } else if index == self.top_index {
            self.elect_top(recency);
        }
        if self.top_index >= self.members.len() {
            self.top_index = 0;
        }
        true
    }

    /// Point `top_index` at the member that comes first in `recency`.
    pub fn elect_top<V>(&mut self, recency: &OrderedKeyStore<WindowHandle, V>) {
        if self.members.len() <= 1 {
            self.top_index = 0;
            return;
        }
        let found = recency
            .keys()
            .find_map(|k| self.members.iter().position(|w| k == w));
        self.top_index = found.unwrap_or(0);
    }

    pub fn set_top(&mut self, window: WindowHandle) -> bool {
        match self.members.iter().position(|w| *w == window) {
            Some(index) => {
                self.top_index = index;
                true
            }
            None => false,
        }
    }

    /// Move the top window one step in `direction` and return the window to
    /// activate. An inactive group first brings its current top window
    /// forward without moving.
    pub fn cycle(&mut self, direction: CycleDirection) -> Option<WindowHandle> {
        if self.members.is_empty() {
            return None;
        }
        if !self.active {
            return self.top();
        }
        let len = self.members.len();
        self.top_index = match direction {
            CycleDirection::Forward => (self.top_index + 1) % len,
            CycleDirection::Backward => (self.top_index + len - 1) % len,
        };
        self.top()
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
