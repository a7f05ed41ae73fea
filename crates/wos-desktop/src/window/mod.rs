//! Window management module
//!
//! Provides window lifecycle, focus management, and change broadcast.

mod app;
mod manager;
#[allow(clippy::module_inception)]
mod window;

pub use app::AppKind;
pub use manager::{SubscriptionId, WindowStore};
pub use window::{LaunchParams, WindowRecord};

/// Unique window identifier
pub type WindowId = u64;
