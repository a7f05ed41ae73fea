//! Core types for the VFS layer.
//!
//! Defines node identity, node snapshots, and display permissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique, stable node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Mint a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the synthetic root view. Never stored in the tree.
    pub(crate) const fn root() -> Self {
        Self(Uuid::nil())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Kind of filesystem entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// Unix-style permission bits, kept for display only.
///
/// Nothing in the VFS consults these to allow or deny an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permissions {
    directory: bool,
    bits: u16,
}

/// Execute bits for owner, group and other.
const EXECUTE_ALL: u16 = 0o111;

impl Permissions {
    /// Build permissions from a kind and octal mode bits (only the low 9 bits are kept).
    pub const fn new(kind: NodeKind, bits: u16) -> Self {
        Self {
            directory: matches!(kind, NodeKind::Directory),
            bits: bits & 0o777,
        }
    }

    /// Default for new directories (`drwxr-xr-x`).
    pub const fn directory_default() -> Self {
        Self::new(NodeKind::Directory, 0o755)
    }

    /// Default for new files (`-rw-r--r--`).
    pub const fn file_default() -> Self {
        Self::new(NodeKind::File, 0o644)
    }

    /// Default for the given kind.
    pub const fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Directory => Self::directory_default(),
            NodeKind::File => Self::file_default(),
        }
    }

    /// Octal mode bits.
    #[inline]
    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Replace the mode bits, keeping the kind flag.
    #[inline]
    pub fn with_bits(self, bits: u16) -> Self {
        Self {
            directory: self.directory,
            bits: bits & 0o777,
        }
    }

    /// Set the execute bit in all three triplets.
    #[inline]
    pub fn with_execute(self) -> Self {
        self.with_bits(self.bits | EXECUTE_ALL)
    }

    /// Clear the execute bit in all three triplets.
    #[inline]
    pub fn without_execute(self) -> Self {
        self.with_bits(self.bits & !EXECUTE_ALL)
    }

    /// Whether any triplet carries the execute bit.
    #[inline]
    pub fn is_executable(&self) -> bool {
        self.bits & EXECUTE_ALL != 0
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(10);
        out.push(if self.directory { 'd' } else { '-' });
        for shift in [6u16, 3, 0] {
            let triplet = (self.bits >> shift) & 0o7;
            out.push(if triplet & 0o4 != 0 { 'r' } else { '-' });
            out.push(if triplet & 0o2 != 0 { 'w' } else { '-' });
            out.push(if triplet & 0o1 != 0 { 'x' } else { '-' });
        }
        f.write_str(&out)
    }
}

impl FromStr for Permissions {
    type Err = String;

    /// Parse a 10-character display string such as `drwxr-xr-x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 10 {
            return Err(format!("expected 10 characters, got {:?}", s));
        }

        let directory = match chars[0] {
            'd' => true,
            '-' => false,
            other => return Err(format!("unknown kind flag {:?}", other)),
        };

        let mut bits = 0u16;
        for (i, c) in chars[1..].iter().enumerate() {
            let expected = ['r', 'w', 'x'][i % 3];
            bits <<= 1;
            if *c == expected {
                bits |= 1;
            } else if *c != '-' {
                return Err(format!("unexpected {:?} at position {}", c, i + 1));
            }
        }

        Ok(Self { directory, bits })
    }
}

impl TryFrom<String> for Permissions {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permissions> for String {
    fn from(perms: Permissions) -> Self {
        perms.to_string()
    }
}

/// Kind-specific payload of a node snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeEntry {
    /// File with its content
    File {
        /// Raw content bytes
        content: Vec<u8>,
    },
    /// Directory with its children, in insertion order
    Directory {
        /// Child snapshots
        children: Vec<Node>,
    },
}

/// A materialized node: a detached copy of a file, or of a whole directory subtree.
///
/// Snapshots never alias the live tree; holding one across later writes is safe,
/// it simply goes stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier
    pub id: NodeId,
    /// Entry name (never contains `/`)
    pub name: String,
    /// File content or directory children
    #[serde(flatten)]
    pub entry: NodeEntry,
    /// Creation timestamp (millis)
    pub created_at: u64,
    /// Last content or metadata change (millis)
    pub modified_at: u64,
    /// Display permissions
    pub permissions: Permissions,
    /// Owner name
    pub owner: String,
    /// Group name
    pub group: String,
}

impl Node {
    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self.entry {
            NodeEntry::File { .. } => NodeKind::File,
            NodeEntry::Directory { .. } => NodeKind::Directory,
        }
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.entry, NodeEntry::File { .. })
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.entry, NodeEntry::Directory { .. })
    }

    /// File content, or `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.entry {
            NodeEntry::File { content } => Some(content),
            NodeEntry::Directory { .. } => None,
        }
    }

    /// Directory children, or `None` for files.
    pub fn children(&self) -> Option<&[Node]> {
        match &self.entry {
            NodeEntry::File { .. } => None,
            NodeEntry::Directory { children } => Some(children),
        }
    }

    /// Size in bytes (0 for directories).
    pub fn size(&self) -> u64 {
        self.content().map_or(0, |c| c.len() as u64)
    }
}
