//! Immutable desktop state published to observers

use crate::window::{WindowId, WindowRecord};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of the window collection
///
/// Observers receive one of these after every state change. It owns its
/// records, so holding on to it never blocks or mirrors later updates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopSnapshot {
    /// Windows in launch order
    pub windows: Vec<WindowRecord>,
    /// Focused window, if any
    pub active: Option<WindowId>,
}

impl DesktopSnapshot {
    /// Create a snapshot
    pub fn new(windows: Vec<WindowRecord>, active: Option<WindowId>) -> Self {
        Self { windows, active }
    }

    /// Look up a window by id
    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Windows sorted back to front
    pub fn by_z(&self) -> Vec<&WindowRecord> {
        let mut windows: Vec<&WindowRecord> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    /// Minimized windows, for the taskbar tray
    pub fn minimized(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| w.is_minimized)
    }
}
