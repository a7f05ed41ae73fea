//! Virtual filesystem for the web OS shell
//!
//! The VFS is a single-process, in-memory tree of files and directories:
//!
//! - **Path**: pure normalization and `cwd`-relative resolution
//! - **Tree**: arena-backed node storage with structural primitives
//! - **Service**: the [`VfsService`] operation surface and its [`Vfs`] implementation
//! - **Bootstrap**: the default tree a fresh session starts with
//!
//! # Design Principles
//!
//! 1. **Hierarchical paths**: Unix-like `/path/to/file` semantics
//! 2. **Detached reads**: every read returns an independent copy, never a live reference
//! 3. **Atomic writes**: an operation either fully applies or leaves the tree untouched
//! 4. **Cosmetic permissions**: permission strings are displayed, never enforced
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        VFS Layer                          │
//! │                                                           │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                  Vfs (VfsService)                   │  │
//! │  │  • Path normalization   • Copy / move placement     │  │
//! │  │  • Shape validation     • chmod grammar             │  │
//! │  └─────────────────────────┬──────────────────────────┘  │
//! │                            │                              │
//! │                            ▼                              │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                     NodeTree                        │  │
//! │  │  • id → NodeRecord table  • ordered child id lists  │  │
//! │  │  • find / insert / remove • subtree clone           │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod bootstrap;
pub mod clock;
pub mod core;
pub mod service;
pub mod storage;
pub mod tree;
pub mod vfs;

// Convenient re-exports at crate root
pub use bootstrap::{bootstrap_filesystem, BootstrapLayout};
pub use clock::{Clock, SystemClock, TickClock};
pub use self::core::{filename, is_under, join_path, normalize, parent_path, resolve};
pub use self::core::{ModeSpec, Node, NodeEntry, NodeId, NodeKind, Permissions, VfsError};
pub use service::VfsService;
pub use storage::StorageUsage;
pub use vfs::{Vfs, VfsOptions};
