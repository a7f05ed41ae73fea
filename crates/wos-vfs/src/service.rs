//! VfsService trait definition.

use crate::core::{path, Node, VfsError};
use crate::storage::StorageUsage;

/// Virtual filesystem operation surface.
///
/// Every path goes through [`path::normalize`] first. Each call is atomic:
/// it either succeeds completely or leaves the tree untouched. Reads return
/// detached copies, never references into the live tree.
pub trait VfsService {
    // ========== Directory Operations ==========

    /// List a directory's children in insertion order.
    fn read_directory(&self, path: &str) -> Result<Vec<Node>, VfsError>;

    /// Create an empty directory. The parent must exist; the name must be free.
    fn make_directory(&mut self, path: &str) -> Result<(), VfsError>;

    /// Create a directory and every missing ancestor.
    fn make_directory_all(&mut self, path: &str) -> Result<(), VfsError>;

    // ========== File Operations ==========

    /// Read a file's content.
    fn read_file(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Read a file's content as text, replacing invalid UTF-8.
    fn read_text(&self, path: &str) -> Result<String, VfsError> {
        self.read_file(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Create a file, or replace the content of an existing one.
    ///
    /// Fails if the parent is missing or is a file, or if `path` names a directory.
    fn write_file(&mut self, path: &str, content: &[u8]) -> Result<(), VfsError>;

    // ========== Tree Operations ==========

    /// Remove a file or a whole directory subtree.
    fn delete_item(&mut self, path: &str) -> Result<(), VfsError>;

    /// Deep-copy `source` to `dest`. Every copied node gets a fresh id.
    ///
    /// If `dest` is an existing directory the copy lands inside it under the
    /// source's name; otherwise `dest`'s last segment becomes the new name.
    /// An existing entry with the target name is overwritten.
    fn copy_item(&mut self, source: &str, dest: &str) -> Result<(), VfsError>;

    /// Relocate `source` to `dest` with the same placement rules as [`VfsService::copy_item`].
    ///
    /// Rejected when `dest` is `source` or lies beneath it.
    fn move_item(&mut self, source: &str, dest: &str) -> Result<(), VfsError>;

    // ========== Metadata Operations ==========

    /// Change display permissions: `NNN` octal, `+x` or `-x`.
    fn chmod(&mut self, path: &str, mode: &str) -> Result<(), VfsError>;

    /// Materialize the node at `path` (the root yields a synthetic directory).
    fn stat(&self, path: &str) -> Result<Node, VfsError>;

    /// Check if a path names a node.
    fn exists(&self, path: &str) -> bool;

    /// Storage usage for the subtree at `path`.
    fn usage(&self, path: &str) -> Result<StorageUsage, VfsError>;

    // ========== Path Utilities ==========

    /// Resolve `target` against `cwd`. Never touches the tree.
    fn resolve(&self, cwd: &str, target: &str) -> String {
        path::resolve(cwd, target)
    }
}
