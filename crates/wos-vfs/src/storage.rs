//! Storage usage accounting for a subtree.

use serde::{Deserialize, Serialize};

/// Storage usage statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Total content bytes
    pub used_bytes: u64,

    /// Number of files
    pub file_count: u64,

    /// Number of directories (including the subtree root when it is one)
    pub directory_count: u64,
}

impl StorageUsage {
    /// Create new empty usage stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the usage stats.
    pub fn add_file(&mut self, size: u64) {
        self.file_count += 1;
        self.used_bytes += size;
    }

    /// Add a directory to the usage stats.
    pub fn add_directory(&mut self) {
        self.directory_count += 1;
    }
}
