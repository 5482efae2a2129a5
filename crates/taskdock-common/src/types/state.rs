use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Windowing-system state bits cached per window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WindowState: u16 {
        const MINIMIZED     = 1 << 0;
        const MAXIMIZED     = 1 << 1;
        const FULLSCREEN    = 1 << 2;
        const SKIP_PAGER    = 1 << 3;
        const SKIP_TASKLIST = 1 << 4;
        const STICKY        = 1 << 5;
        const SHADED        = 1 << 6;
        const ABOVE         = 1 << 7;
        const BELOW         = 1 << 8;
        const URGENT        = 1 << 9;
    }
}

impl WindowState {
    /// Whether the window asks to be listed in task lists at all.
    pub fn is_listed(self) -> bool {
        !self.contains(Self::SKIP_TASKLIST)
    }

    pub fn is_minimized(self) -> bool {
        self.contains(Self::MINIMIZED)
    }
}
