//! Batch bookkeeping: sweep, persist, notify.

use tracing::{debug, error, warn};

use crate::apps::AppKey;
use crate::store::StoreError;

use super::Dock;

/// Unwrap a store result the synchronization layer relies on. A failure
/// means the dock's own bookkeeping is inconsistent.
pub(super) fn contract<T>(result: Result<T, StoreError>, context: &str) -> Option<T> {
    debug_assert!(result.is_ok(), "store contract violated while trying to {context}");
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("store contract violated while trying to {context}: {e}");
            None
        }
    }
}

impl Dock {
    /// Run `f` as one batch and flush its effects.
    pub(super) fn run_batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let result = f(self);
        self.finish_batch();
        result
    }

    fn finish_batch(&mut self) {
        self.sweep_groups();
        self.check_recency_head();

        let batch = std::mem::take(&mut self.batch);

        if batch.pins_changed {
            let pinned = self.pinned_ids();
            debug!(?pinned, "saving pinned applications");
            if let Err(e) = self.store.save_pinned(&pinned) {
                warn!("failed to save pinned applications: {e}");
            }
        }
        if batch.overrides_changed {
            if let Err(e) = self
                .store
                .save_overrides(self.state.resolver.launcher_overrides())
            {
                warn!("failed to save launcher overrides: {e}");
            }
        }

        if batch.structure_changed {
            self.observer.groups_changed();
        }
        for app in &batch.touched {
            if !batch.created.contains(app) && self.state.groups.contains(app) {
                self.observer.group_style_changed(app);
            }
        }
    }

    /// Drop unpinned groups without members, then any placeholder nothing
    /// refers to anymore.
    fn sweep_groups(&mut self) {
        let garbage: Vec<AppKey> = self
            .state
            .groups
            .values()
            .filter(|g| g.is_garbage())
            .map(|g| g.app().clone())
            .collect();
        if garbage.is_empty() && !self.batch.structure_changed {
            return;
        }

        for app in &garbage {
            if contract(self.state.groups.pop(app), "remove empty group").is_some() {
                debug!("group {app} removed");
            }
        }
        self.batch.structure_changed = true;

        let groups = &self.state.groups;
        let windows = &self.state.windows;
        self.state
            .resolver
            .retain_placeholders(|key| groups.contains(key) || windows.values().any(|b| b.app() == key));
    }

    fn check_recency_head(&self) {
        let Some(active) = self.state.active else {
            return;
        };
        let head = self.state.windows.first_key().copied();
        if head != Some(active) {
            error!(
                "active window {active} is not at the head of the recency list (head: {head:?})"
            );
        }
        debug_assert_eq!(head, Some(active), "recency head out of sync with active window");
    }
}
