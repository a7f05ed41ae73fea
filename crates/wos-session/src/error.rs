//! Session error type

use thiserror::Error;
use wos_vfs::VfsError;

/// Failures surfaced by the session layer
#[derive(Debug, Error)]
pub enum SessionError {
    /// A filesystem operation was rejected
    #[error(transparent)]
    Vfs(#[from] VfsError),

    /// Configuration or payload JSON could not be parsed or produced
    #[error("invalid session json: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// The filesystem error, if this is one
    pub fn as_vfs(&self) -> Option<&VfsError> {
        match self {
            SessionError::Vfs(err) => Some(err),
            SessionError::Json(_) => None,
        }
    }
}
