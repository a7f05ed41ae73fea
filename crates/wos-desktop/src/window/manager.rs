//! Window store for lifecycle, focus, and z-order

use super::{AppKind, LaunchParams, WindowId, WindowRecord};
use crate::math::{Size, Vec2};
use crate::snapshot::DesktopSnapshot;
use log::{debug, trace};
use std::fmt;

/// Handle returned by [`WindowStore::subscribe`]
pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&DesktopSnapshot)>;

/// Authoritative collection of open windows
///
/// Owns the records, the monotonic z-index counter, and the single
/// active-window pointer. Every state change is broadcast to subscribers as
/// a fresh [`DesktopSnapshot`].
pub struct WindowStore {
    /// Open windows in launch order
    windows: Vec<WindowRecord>,
    /// Focused window (never a minimized one)
    active: Option<WindowId>,
    /// Next window ID
    next_id: WindowId,
    /// Next z-index value
    next_z: u64,
    /// Change observers
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WindowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowStore")
            .field("windows", &self.windows)
            .field("active", &self.active)
            .field("next_id", &self.next_id)
            .field("next_z", &self.next_z)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl WindowStore {
    /// Base offset of the cascade
    pub const CASCADE_ORIGIN: f32 = 100.0;
    /// Per-window cascade step
    pub const CASCADE_STEP: f32 = 30.0;
    /// Cascade wraps back to the origin after this many windows
    pub const CASCADE_WRAP: usize = 10;

    /// Create an empty store
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            next_id: 1,
            next_z: 1,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Open a window for `app_kind`
    ///
    /// A singleton kind launched without params focuses its existing
    /// instance instead of opening another one.
    pub fn launch(&mut self, app_kind: AppKind, params: Option<LaunchParams>) -> WindowId {
        if app_kind.is_singleton() && params.is_none() {
            if let Some(existing) = self.windows.iter().find(|w| w.app_kind == app_kind) {
                let id = existing.id;
                debug!("launch {:?}: focusing existing window {}", app_kind, id);
                if self.focus_inner(id) {
                    self.broadcast();
                }
                return id;
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        let z_index = self.bump_z();

        let window = WindowRecord {
            id,
            app_kind,
            title: app_kind.title().to_string(),
            is_minimized: false,
            is_maximized: false,
            z_index,
            position: Self::cascade_position(self.windows.len()),
            size: app_kind.default_size(),
            launch_params: params,
        };

        debug!("launch {:?}: window {} at z {}", app_kind, id, z_index);
        self.windows.push(window);
        self.active = Some(id);
        self.broadcast();
        id
    }

    /// Close a window
    ///
    /// Closing the active window leaves nothing focused.
    pub fn close(&mut self, id: WindowId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() == before {
            debug!("close: unknown window {}", id);
            return;
        }
        if self.active == Some(id) {
            self.active = None;
        }
        debug!("close: window {}", id);
        self.broadcast();
    }

    /// Focus a window (brings to top and restores from minimized)
    pub fn focus(&mut self, id: WindowId) {
        if self.focus_inner(id) {
            self.broadcast();
        }
    }

    /// Minimize a window, dropping focus if it had it
    pub fn minimize(&mut self, id: WindowId) {
        let Some(window) = self.window_mut(id, "minimize") else {
            return;
        };
        window.is_minimized = true;
        if self.active == Some(id) {
            self.active = None;
        }
        debug!("minimize: window {}", id);
        self.broadcast();
    }

    /// Flip the maximized flag, then focus the window
    pub fn toggle_maximize(&mut self, id: WindowId) {
        let Some(window) = self.window_mut(id, "toggle_maximize") else {
            return;
        };
        window.is_maximized = !window.is_maximized;
        debug!("toggle_maximize: window {} -> {}", id, window.is_maximized);
        self.focus_inner(id);
        self.broadcast();
    }

    /// Move a window to a new position
    pub fn move_window(&mut self, id: WindowId, x: f32, y: f32) {
        let Some(window) = self.window_mut(id, "move") else {
            return;
        };
        window.position = Vec2::new(x, y);
        self.broadcast();
    }

    /// Resize a window
    ///
    /// A manual resize un-maximizes the window.
    pub fn resize(&mut self, id: WindowId, width: f32, height: f32) {
        let Some(window) = self.window_mut(id, "resize") else {
            return;
        };
        window.size = Size::new(width, height);
        window.is_maximized = false;
        self.broadcast();
    }

    /// Replace a window's title
    pub fn set_title(&mut self, id: WindowId, title: impl Into<String>) {
        let Some(window) = self.window_mut(id, "set_title") else {
            return;
        };
        window.title = title.into();
        self.broadcast();
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// All windows in launch order
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    /// Get windows sorted by z-index (back to front)
    pub fn windows_by_z(&self) -> Vec<&WindowRecord> {
        let mut windows: Vec<&WindowRecord> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    /// Currently focused window
    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Get the number of windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot::new(self.windows.clone(), self.active)
    }

    /// Register an observer called with a fresh snapshot after every change
    pub fn subscribe(&mut self, observer: impl FnMut(&DesktopSnapshot) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop an observer; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Cascade slot for the `open`-th concurrently open window
    pub fn cascade_position(open: usize) -> Vec2 {
        let offset = (open % Self::CASCADE_WRAP) as f32 * Self::CASCADE_STEP;
        Vec2::splat(Self::CASCADE_ORIGIN + offset)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn bump_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    fn window_mut(&mut self, id: WindowId, op: &str) -> Option<&mut WindowRecord> {
        let window = self.windows.iter_mut().find(|w| w.id == id);
        if window.is_none() {
            debug!("{}: unknown window {}", op, id);
        }
        window
    }

    /// Returns whether anything changed
    fn focus_inner(&mut self, id: WindowId) -> bool {
        if self.active == Some(id) {
            return false;
        }
        let z_index = self.next_z;
        let Some(window) = self.window_mut(id, "focus") else {
            return false;
        };
        window.z_index = z_index;
        window.is_minimized = false;
        self.next_z += 1;
        self.active = Some(id);
        debug!("focus: window {} at z {}", id, z_index);
        true
    }

    fn broadcast(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        trace!("broadcast to {} observers", self.observers.len());
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}
