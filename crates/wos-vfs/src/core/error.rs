//! Error types for the VFS layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from VFS operations.
///
/// Every variant is an expected, recoverable outcome. Callers decide how to
/// surface it (toast, inline message, or nothing at all).
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum VfsError {
    /// Path does not resolve to any node
    #[error("no such file or directory: {0}")]
    NotFound(String),

    /// Operation needs a directory but found a file
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Operation needs a file but found a directory
    #[error("is a directory: {0}")]
    NotAFile(String),

    /// A sibling with the same name already exists
    #[error("file exists: {0}")]
    NameCollision(String),

    /// Move target is the source itself or one of its descendants
    #[error("cannot move '{from}' into itself ('{to}')")]
    InvalidCycle {
        /// Source path
        from: String,
        /// Rejected destination path
        to: String,
    },

    /// chmod argument matches no accepted grammar
    #[error("invalid mode: '{0}'")]
    InvalidModeSpec(String),

    /// Path is well-formed but names something that cannot be operated on
    #[error("invalid path: '{0}'")]
    InvalidPath(String),
}

impl VfsError {
    /// Create an invalid cycle error.
    pub fn cycle(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidCycle {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }

    /// The path (or mode string) the error refers to.
    pub fn path(&self) -> &str {
        match self {
            VfsError::NotFound(p)
            | VfsError::NotADirectory(p)
            | VfsError::NotAFile(p)
            | VfsError::NameCollision(p)
            | VfsError::InvalidModeSpec(p)
            | VfsError::InvalidPath(p) => p,
            VfsError::InvalidCycle { to, .. } => to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(VfsError::NotFound("/x".into()).is_not_found());
        assert!(!VfsError::NotAFile("/x".into()).is_not_found());
    }

    #[test]
    fn test_display() {
        let err = VfsError::cycle("/a", "/a/b");
        assert_eq!(err.to_string(), "cannot move '/a' into itself ('/a/b')");
        assert_eq!(err.path(), "/a/b");

        let err = VfsError::NameCollision("/home/user".into());
        assert_eq!(err.to_string(), "file exists: /home/user");
    }

    #[test]
    fn test_serde_roundtrip() {
        let err = VfsError::InvalidModeSpec("rwx".into());
        let json = serde_json::to_string(&err).unwrap();
        let restored: VfsError = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, err);
    }
}
