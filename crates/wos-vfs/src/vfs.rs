//! In-memory VFS facade over the node tree.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::core::path::{
    filename, is_strict_descendant, join_path, normalize, parent_path, segments, validate_name,
};
use crate::core::{ModeSpec, Node, NodeId, VfsError};
use crate::service::VfsService;
use crate::storage::StorageUsage;
use crate::tree::{NodeRecord, NodeTree, Payload, Slot};

/// Ownership stamped on newly created nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VfsOptions {
    /// Owner name
    pub owner: String,
    /// Group name
    pub group: String,
}

impl Default for VfsOptions {
    fn default() -> Self {
        Self {
            owner: String::from("user"),
            group: String::from("users"),
        }
    }
}

/// The single in-memory filesystem of a session.
pub struct Vfs {
    tree: NodeTree,
    clock: Box<dyn Clock>,
    options: VfsOptions,
}

impl std::fmt::Debug for Vfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vfs")
            .field("nodes", &self.tree.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs {
    /// Create an empty filesystem using the wall clock.
    pub fn new() -> Self {
        Self::with_options(VfsOptions::default(), SystemClock)
    }

    /// Create an empty filesystem with a custom clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::with_options(VfsOptions::default(), clock)
    }

    /// Create an empty filesystem with explicit ownership and clock.
    pub fn with_options(options: VfsOptions, clock: impl Clock + 'static) -> Self {
        Self {
            tree: NodeTree::new(),
            clock: Box::new(clock),
            options,
        }
    }

    /// Ownership applied to new nodes.
    pub fn options(&self) -> &VfsOptions {
        &self.options
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    fn lookup(&self, path: &str) -> Result<Slot, VfsError> {
        self.tree
            .find(path)
            .ok_or_else(|| VfsError::NotFound(String::from(path)))
    }

    fn lookup_node(&self, path: &str) -> Result<NodeId, VfsError> {
        match self.lookup(path)? {
            Slot::Node(id) => Ok(id),
            Slot::Root => Err(VfsError::InvalidPath(String::from(path))),
        }
    }

    /// Work out where `source_name` lands for a copy or move to `dest`.
    ///
    /// Returns the parent slot, the parent path and the final name.
    fn placement(&self, source_name: &str, dest: &str) -> Result<(Slot, String, String), VfsError> {
        if let Some(slot) = self.tree.find(dest) {
            if self.tree.children(slot).is_some() {
                return Ok((slot, String::from(dest), String::from(source_name)));
            }
        }

        let parent = parent_path(dest);
        let name = String::from(filename(dest));
        validate_name(&name, dest)?;

        let slot = self.lookup(&parent)?;
        if self.tree.children(slot).is_none() {
            return Err(VfsError::NotADirectory(parent));
        }
        Ok((slot, parent, name))
    }

    /// Drop whatever currently occupies `name` under `parent`.
    fn evict(&mut self, parent: Slot, name: &str) {
        if let Some(existing) = self.tree.child_named(parent, name) {
            self.tree.detach(existing);
            let dropped = self.tree.purge(existing);
            debug!("evicted '{}' ({} nodes)", name, dropped);
        }
    }

    fn copy_inner(&mut self, source: &str, dest: &str) -> Result<(), VfsError> {
        let source_id = self.lookup_node(source)?;
        let source_name = self
            .tree
            .get(source_id)
            .map(|n| n.name.clone())
            .ok_or_else(|| VfsError::NotFound(String::from(source)))?;
        let (parent, _, name) = self.placement(&source_name, dest)?;

        // Clone before evicting: the target may be an ancestor of the source.
        let copy = self
            .tree
            .clone_subtree(source_id)
            .ok_or_else(|| VfsError::NotFound(String::from(source)))?;
        self.evict(parent, &name);
        if let Err(err) = self.tree.attach(parent, copy, &name) {
            self.tree.purge(copy);
            return Err(err);
        }
        Ok(())
    }

    fn move_inner(&mut self, source: &str, dest: &str) -> Result<(), VfsError> {
        if source == "/" {
            return Err(VfsError::InvalidPath(String::from(source)));
        }
        if source == dest || is_strict_descendant(dest, source) {
            return Err(VfsError::cycle(source, dest));
        }

        let source_id = self.lookup_node(source)?;
        let source_name = self
            .tree
            .get(source_id)
            .map(|n| n.name.clone())
            .ok_or_else(|| VfsError::NotFound(String::from(source)))?;
        let (parent, parent_path, name) = self.placement(&source_name, dest)?;

        if join_path(&parent_path, &name) == source {
            return Ok(());
        }

        // Every check is done; from here on the relocation cannot fail halfway.
        self.tree.detach(source_id);
        self.evict(parent, &name);
        self.tree.attach(parent, source_id, &name)
    }

    fn mkdir_inner(&mut self, path: &str) -> Result<(), VfsError> {
        if path == "/" {
            return Err(VfsError::InvalidPath(String::from(path)));
        }
        let name = filename(path);
        validate_name(name, path)?;

        let now = self.clock.now();
        let record = NodeRecord::directory(name, &self.options.owner, &self.options.group, now);
        self.tree.insert(&parent_path(path), record).map(|_| ())
    }

    fn write_inner(&mut self, path: &str, content: &[u8]) -> Result<(), VfsError> {
        let name = filename(path);
        validate_name(name, path)?;

        let parent_path = parent_path(path);
        let parent = self.lookup(&parent_path)?;
        if self.tree.children(parent).is_none() {
            return Err(VfsError::NotADirectory(parent_path));
        }

        let now = self.clock.now();
        match self.tree.child_named(parent, name) {
            Some(id) => {
                let record = self
                    .tree
                    .get_mut(id)
                    .ok_or_else(|| VfsError::NotFound(String::from(path)))?;
                match &mut record.payload {
                    Payload::File(existing) => {
                        *existing = content.to_vec();
                        record.modified_at = now;
                        Ok(())
                    }
                    Payload::Directory(_) => Err(VfsError::NotAFile(String::from(path))),
                }
            }
            None => {
                let record = NodeRecord::file(
                    name,
                    content.to_vec(),
                    &self.options.owner,
                    &self.options.group,
                    now,
                );
                self.tree.insert(&parent_path, record).map(|_| ())
            }
        }
    }

    fn chmod_inner(&mut self, path: &str, mode: &str) -> Result<(), VfsError> {
        let id = self.lookup_node(path)?;
        let spec = ModeSpec::parse(mode)?;
        let now = self.clock.now();
        let record = self
            .tree
            .get_mut(id)
            .ok_or_else(|| VfsError::NotFound(String::from(path)))?;
        record.permissions = spec.apply(record.permissions);
        record.modified_at = now;
        Ok(())
    }

    fn usage_inner(&self, path: &str) -> Result<StorageUsage, VfsError> {
        let slot = self.lookup(path)?;
        let mut usage = StorageUsage::new();
        if slot == Slot::Root {
            usage.add_directory();
        }
        self.tree.walk(slot, &mut |record| match &record.payload {
            Payload::File(content) => usage.add_file(content.len() as u64),
            Payload::Directory(_) => usage.add_directory(),
        });
        Ok(usage)
    }
}

/// Log the outcome of a mutating operation.
fn logged<T>(op: &str, path: &str, result: Result<T, VfsError>) -> Result<T, VfsError> {
    match &result {
        Ok(_) => debug!("{} {}", op, path),
        Err(err) => debug!("{} {} rejected: {}", op, path, err),
    }
    result
}

impl VfsService for Vfs {
    fn read_directory(&self, path: &str) -> Result<Vec<Node>, VfsError> {
        let path = normalize(path);
        let slot = self.lookup(&path)?;
        let children = self
            .tree
            .children(slot)
            .ok_or_else(|| VfsError::NotADirectory(path.clone()))?;

        Ok(children
            .iter()
            .filter_map(|&id| self.tree.materialize(Slot::Node(id)))
            .collect())
    }

    fn make_directory(&mut self, path: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        let result = self.mkdir_inner(&path);
        logged("mkdir", &path, result)
    }

    fn make_directory_all(&mut self, path: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        for segment in segments(&path) {
            validate_name(segment, &path)?;
        }

        let mut current = String::from("/");
        for segment in segments(&path) {
            current = join_path(&current, segment);
            match self.tree.find(&current) {
                Some(slot) if self.tree.children(slot).is_some() => {}
                Some(_) => return logged("mkdir -p", &path, Err(VfsError::NotADirectory(current))),
                None => self.make_directory(&current)?,
            }
        }
        Ok(())
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let path = normalize(path);
        let id = match self.lookup(&path)? {
            Slot::Node(id) => id,
            Slot::Root => return Err(VfsError::NotAFile(path)),
        };

        match self.tree.get(id).map(|n| &n.payload) {
            Some(Payload::File(content)) => Ok(content.clone()),
            Some(Payload::Directory(_)) => Err(VfsError::NotAFile(path)),
            None => Err(VfsError::NotFound(path)),
        }
    }

    fn write_file(&mut self, path: &str, content: &[u8]) -> Result<(), VfsError> {
        let path = normalize(path);
        let result = self.write_inner(&path, content);
        logged("write", &path, result)
    }

    fn delete_item(&mut self, path: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        let result = self.tree.remove(&path).map(|dropped| {
            debug!("removed {} nodes under {}", dropped, path);
        });
        logged("delete", &path, result)
    }

    fn copy_item(&mut self, source: &str, dest: &str) -> Result<(), VfsError> {
        let source = normalize(source);
        let dest = normalize(dest);
        let result = self.copy_inner(&source, &dest);
        logged("copy", &format!("{} -> {}", source, dest), result)
    }

    fn move_item(&mut self, source: &str, dest: &str) -> Result<(), VfsError> {
        let source = normalize(source);
        let dest = normalize(dest);
        let result = self.move_inner(&source, &dest);
        logged("move", &format!("{} -> {}", source, dest), result)
    }

    fn chmod(&mut self, path: &str, mode: &str) -> Result<(), VfsError> {
        let path = normalize(path);
        let result = self.chmod_inner(&path, mode);
        logged("chmod", &path, result)
    }

    fn stat(&self, path: &str) -> Result<Node, VfsError> {
        let path = normalize(path);
        let slot = self.lookup(&path)?;
        self.tree.materialize(slot).ok_or(VfsError::NotFound(path))
    }

    fn exists(&self, path: &str) -> bool {
        self.tree.find(&normalize(path)).is_some()
    }

    fn usage(&self, path: &str) -> Result<StorageUsage, VfsError> {
        self.usage_inner(&normalize(path))
    }
}
