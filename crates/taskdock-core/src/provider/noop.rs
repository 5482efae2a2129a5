//! No-op WindowingProvider implementation.
//!
//! Used where no display-server binding is compiled in. The dock still runs
//! and shows pinned launchers.

use taskdock_common::{MonitorId, Timestamp, WindowHandle, WindowState, WorkspaceId};

use super::{Result, WindowIdentity, WindowingProvider};

/// A provider with no windows. Actions succeed and do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl WindowingProvider for NoopProvider {
    fn windows(&self) -> Vec<WindowHandle> {
        Vec::new()
    }

    fn active_window(&self) -> Option<WindowHandle> {
        None
    }

    fn identity(&self, _window: WindowHandle) -> WindowIdentity {
        WindowIdentity::default()
    }

    fn title(&self, _window: WindowHandle) -> String {
        String::new()
    }

    fn state(&self, _window: WindowHandle) -> WindowState {
        WindowState::empty()
    }

    fn workspace(&self, _window: WindowHandle) -> Option<WorkspaceId> {
        None
    }

    fn active_workspace(&self) -> Option<WorkspaceId> {
        None
    }

    fn monitors(&self, _window: WindowHandle) -> Vec<MonitorId> {
        Vec::new()
    }

    fn monitor_count(&self) -> usize {
        1
    }

    fn activate(&self, _window: WindowHandle, _timestamp: Timestamp) -> Result<()> {
        Ok(())
    }

    fn close(&self, _window: WindowHandle, _timestamp: Timestamp) -> Result<()> {
        Ok(())
    }

    fn minimize(&self, _window: WindowHandle) -> Result<()> {
        Ok(())
    }
}
