//! Arena-backed node tree.
//!
//! Nodes live in a flat table keyed by [`NodeId`]; directories hold ordered
//! lists of child ids. The root is synthetic: it owns the top-level list but
//! has no id and no record of its own.
//!
//! The tree only enforces structure (unique sibling names, files never have
//! children). Path-shape validation and atomicity live in the facade.

use std::collections::HashMap;

use crate::core::path::{join_path, segments};
use crate::core::{Node, NodeEntry, NodeId, NodeKind, Permissions, VfsError};

/// Kind-specific storage of a live node.
#[derive(Clone, Debug)]
pub enum Payload {
    /// File content
    File(Vec<u8>),
    /// Child ids in insertion order
    Directory(Vec<NodeId>),
}

/// A live node owned by the tree.
#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    /// Parent directory, `None` for top-level entries and detached nodes
    pub parent: Option<NodeId>,
    pub payload: Payload,
    pub created_at: u64,
    pub modified_at: u64,
    pub permissions: Permissions,
    pub owner: String,
    pub group: String,
}

impl NodeRecord {
    /// A new, unlinked file record.
    pub fn file(name: &str, content: Vec<u8>, owner: &str, group: &str, now: u64) -> Self {
        Self::new(name, Payload::File(content), owner, group, now)
    }

    /// A new, unlinked empty directory record.
    pub fn directory(name: &str, owner: &str, group: &str, now: u64) -> Self {
        Self::new(name, Payload::Directory(Vec::new()), owner, group, now)
    }

    fn new(name: &str, payload: Payload, owner: &str, group: &str, now: u64) -> Self {
        let kind = match payload {
            Payload::File(_) => NodeKind::File,
            Payload::Directory(_) => NodeKind::Directory,
        };
        Self {
            id: NodeId::new(),
            name: String::from(name),
            parent: None,
            payload,
            created_at: now,
            modified_at: now,
            permissions: Permissions::default_for(kind),
            owner: String::from(owner),
            group: String::from(group),
        }
    }

    /// Kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self.payload {
            Payload::File(_) => NodeKind::File,
            Payload::Directory(_) => NodeKind::Directory,
        }
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.payload, Payload::Directory(_))
    }
}

/// Position of a path in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The synthetic root
    Root,
    /// A real node
    Node(NodeId),
}

/// The hierarchical store of every node in one filesystem.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: HashMap<NodeId, NodeRecord>,
    root: Vec<NodeId>,
}

impl NodeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes (the synthetic root is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(&id)
    }

    /// Child ids of a slot, or `None` if it is a file or missing.
    pub fn children(&self, slot: Slot) -> Option<&[NodeId]> {
        match slot {
            Slot::Root => Some(self.root.as_slice()),
            Slot::Node(id) => match &self.nodes.get(&id)?.payload {
                Payload::Directory(children) => Some(children.as_slice()),
                Payload::File(_) => None,
            },
        }
    }

    fn children_mut(&mut self, slot: Slot) -> Option<&mut Vec<NodeId>> {
        match slot {
            Slot::Root => Some(&mut self.root),
            Slot::Node(id) => match &mut self.nodes.get_mut(&id)?.payload {
                Payload::Directory(children) => Some(children),
                Payload::File(_) => None,
            },
        }
    }

    /// Find the child of `slot` called `name`.
    pub fn child_named(&self, slot: Slot, name: &str) -> Option<NodeId> {
        self.children(slot)?
            .iter()
            .copied()
            .find(|id| self.nodes.get(id).is_some_and(|n| n.name == name))
    }

    /// Walk `path` from the root. Cannot descend through a file.
    pub fn find(&self, path: &str) -> Option<Slot> {
        let mut current = Slot::Root;
        for segment in segments(path) {
            current = Slot::Node(self.child_named(current, segment)?);
        }
        Some(current)
    }

    /// Slot of a node's parent.
    pub fn parent_slot(&self, id: NodeId) -> Option<Slot> {
        let record = self.nodes.get(&id)?;
        Some(record.parent.map_or(Slot::Root, Slot::Node))
    }

    /// Check that `parent_path` is a directory that can take a child called `name`.
    pub fn check_vacancy(&self, parent_path: &str, name: &str) -> Result<Slot, VfsError> {
        let parent = self
            .find(parent_path)
            .ok_or_else(|| VfsError::NotFound(String::from(parent_path)))?;
        if self.children(parent).is_none() {
            return Err(VfsError::NotADirectory(String::from(parent_path)));
        }
        if self.child_named(parent, name).is_some() {
            return Err(VfsError::NameCollision(join_path(parent_path, name)));
        }
        Ok(parent)
    }

    /// Insert a fresh leaf record under `parent_path`.
    ///
    /// Children keep insertion order; listings are not sorted here.
    pub fn insert(&mut self, parent_path: &str, record: NodeRecord) -> Result<NodeId, VfsError> {
        let parent = self.check_vacancy(parent_path, &record.name)?;
        let id = record.id;
        let name = record.name.clone();
        self.nodes.insert(id, record);
        if let Err(err) = self.attach(parent, id, &name) {
            self.nodes.remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    /// Remove the node at `path` and its whole subtree. Returns the number of nodes dropped.
    pub fn remove(&mut self, path: &str) -> Result<usize, VfsError> {
        match self.find(path) {
            Some(Slot::Node(id)) => {
                self.detach(id);
                Ok(self.purge(id))
            }
            Some(Slot::Root) => Err(VfsError::InvalidPath(String::from(path))),
            None => Err(VfsError::NotFound(String::from(path))),
        }
    }

    /// Unlink a node from its parent. The record and its subtree stay in the table.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent_slot(id) else {
            return;
        };
        if let Some(children) = self.children_mut(parent) {
            children.retain(|&child| child != id);
        }
        if let Some(record) = self.nodes.get_mut(&id) {
            record.parent = None;
        }
    }

    /// Absolute path of a slot, rebuilt from parent links.
    pub fn path_of(&self, slot: Slot) -> String {
        let mut names = Vec::new();
        let mut current = match slot {
            Slot::Root => None,
            Slot::Node(id) => Some(id),
        };
        while let Some(id) = current {
            let Some(record) = self.nodes.get(&id) else {
                break;
            };
            names.push(record.name.as_str());
            current = record.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Link a detached node under `parent` with the given name.
    ///
    /// Error paths name the location the node would have taken.
    pub fn attach(&mut self, parent: Slot, id: NodeId, name: &str) -> Result<(), VfsError> {
        let parent_path = self.path_of(parent);
        if !self.nodes.contains_key(&id) {
            return Err(VfsError::NotFound(join_path(&parent_path, name)));
        }
        if self.child_named(parent, name).is_some() {
            return Err(VfsError::NameCollision(join_path(&parent_path, name)));
        }
        let children = self
            .children_mut(parent)
            .ok_or(VfsError::NotADirectory(parent_path))?;
        children.push(id);

        if let Some(record) = self.nodes.get_mut(&id) {
            record.name = String::from(name);
            record.parent = match parent {
                Slot::Root => None,
                Slot::Node(parent_id) => Some(parent_id),
            };
        }
        Ok(())
    }

    /// Drop a detached node and all its descendants from the table.
    pub fn purge(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(next) = stack.pop() {
            if let Some(record) = self.nodes.remove(&next) {
                removed += 1;
                if let Payload::Directory(children) = record.payload {
                    stack.extend(children);
                }
            }
        }
        removed
    }

    /// Deep-clone the subtree rooted at `id`, minting a fresh id for every node.
    ///
    /// The clone is left detached; link it with [`NodeTree::attach`].
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let source = self.nodes.get(&id)?.clone();
        let new_id = NodeId::new();

        let payload = match source.payload {
            Payload::File(content) => Payload::File(content),
            Payload::Directory(children) => {
                let mut cloned = Vec::with_capacity(children.len());
                for child in children {
                    let child_id = self.clone_subtree(child)?;
                    if let Some(record) = self.nodes.get_mut(&child_id) {
                        record.parent = Some(new_id);
                    }
                    cloned.push(child_id);
                }
                Payload::Directory(cloned)
            }
        };

        self.nodes.insert(
            new_id,
            NodeRecord {
                id: new_id,
                parent: None,
                payload,
                ..source
            },
        );
        Some(new_id)
    }

    /// Materialize a detached copy of the node at `slot` and everything below it.
    pub fn materialize(&self, slot: Slot) -> Option<Node> {
        match slot {
            Slot::Root => Some(Node {
                id: NodeId::root(),
                name: String::new(),
                entry: NodeEntry::Directory {
                    children: self.materialize_children(&self.root),
                },
                created_at: 0,
                modified_at: 0,
                permissions: Permissions::directory_default(),
                owner: String::from("root"),
                group: String::from("root"),
            }),
            Slot::Node(id) => {
                let record = self.nodes.get(&id)?;
                let entry = match &record.payload {
                    Payload::File(content) => NodeEntry::File {
                        content: content.clone(),
                    },
                    Payload::Directory(children) => NodeEntry::Directory {
                        children: self.materialize_children(children),
                    },
                };
                Some(Node {
                    id: record.id,
                    name: record.name.clone(),
                    entry,
                    created_at: record.created_at,
                    modified_at: record.modified_at,
                    permissions: record.permissions,
                    owner: record.owner.clone(),
                    group: record.group.clone(),
                })
            }
        }
    }

    fn materialize_children(&self, children: &[NodeId]) -> Vec<Node> {
        children
            .iter()
            .filter_map(|&id| self.materialize(Slot::Node(id)))
            .collect()
    }

    /// Visit every node in the subtree at `slot`, depth first.
    pub fn walk(&self, slot: Slot, visit: &mut impl FnMut(&NodeRecord)) {
        if let Slot::Node(id) = slot {
            match self.nodes.get(&id) {
                Some(record) => visit(record),
                None => return,
            }
        }
        if let Some(children) = self.children(slot) {
            for &child in children {
                self.walk(Slot::Node(child), visit);
            }
        }
    }
}
