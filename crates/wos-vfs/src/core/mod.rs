//! Core VFS types and utilities

mod error;
mod mode;
pub mod path;
mod types;

pub use error::VfsError;
pub use mode::ModeSpec;
pub use path::{filename, is_under, join_path, normalize, parent_path, resolve};
pub use types::{Node, NodeEntry, NodeId, NodeKind, Permissions};
