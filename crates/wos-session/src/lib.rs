//! Session composition root for the web OS shell
//!
//! An [`OsSession`] co-locates the two stores a simulated desktop needs:
//!
//! - a [`wos_vfs::Vfs`] seeded with the default filesystem layout
//! - a [`wos_desktop::WindowStore`] tracking open application windows
//!
//! plus the user's [`SessionConfig`]. With the `wasm` feature, a
//! `SessionController` exposes the whole surface to a browser front end.

pub mod config;
pub mod error;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{SessionConfig, DEFAULT_SETTINGS};
pub use error::SessionError;
pub use session::OsSession;

pub use wos_desktop as desktop;
pub use wos_vfs as vfs;
