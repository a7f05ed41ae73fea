//! Window management core for the web OS shell
//!
//! The desktop crate owns the authoritative model of open application
//! windows:
//!
//! - **Math**: the small geometry vocabulary windows are placed with
//! - **Window**: [`AppKind`], [`WindowRecord`], and the [`WindowStore`] that
//!   mutates them
//! - **Snapshot**: the immutable [`DesktopSnapshot`] handed to renderers
//!
//! # Invariants
//!
//! 1. **Monotonic stacking**: z-indices strictly increase and are never reused
//! 2. **Single focus**: at most one window is active, and never a minimized one
//! 3. **Read-only views**: observers get owned snapshots, never live references

pub mod math;
pub mod snapshot;
pub mod window;

pub use math::{Rect, Size, Vec2};
pub use snapshot::DesktopSnapshot;
pub use window::{AppKind, LaunchParams, SubscriptionId, WindowId, WindowRecord, WindowStore};
