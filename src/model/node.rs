//! Node module for clustering tree representation.

use crate::error::{NjError, Result};

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// NODE KIND
// =#========================================================================#=
/// Role of a [Node] within its tree.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Synthetic root; never has a parent
    Root,
    /// Node created by merging two other nodes
    Internal,
    /// Node for an original input entity
    Leaf,
}

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node in a clustering tree.
///
/// # Invariants
/// - `index` is the position of this node in the tree's arena
/// - `parent` is set at most once and never reassigned; the root has none
/// - `children` are kept in insertion order (merge order for internal nodes,
///   attachment order for the root); leaves have none
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    index: NodeIndex,
    kind: NodeKind,
    label: String,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl Node {
    /// Creates a new root node without children.
    pub(crate) fn new_root(index: NodeIndex, label: String) -> Self {
        Node {
            index,
            kind: NodeKind::Root,
            label,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates a new internal node owning `children`, whose parents still
    /// have to be set.
    pub(crate) fn new_internal(index: NodeIndex, label: String, children: Vec<NodeIndex>) -> Self {
        Node {
            index,
            kind: NodeKind::Internal,
            label,
            parent: None,
            children,
        }
    }

    /// Creates a new leaf node without parent.
    pub(crate) fn new_leaf(index: NodeIndex, label: String) -> Self {
        Node {
            index,
            kind: NodeKind::Leaf,
            label,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the role of this node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the label of this node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the index of the parent, or `None` for the root and for
    /// nodes not attached yet.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns whether a parent has been set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the child indices in insertion order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns whether this is the root.
    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// Returns whether this is an internal (merge) node.
    pub fn is_internal(&self) -> bool {
        self.kind == NodeKind::Internal
    }

    /// Returns whether this is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// Sets the parent, which may only happen once and never for the root.
    pub(crate) fn set_parent(&mut self, parent: NodeIndex) -> Result<()> {
        if self.is_root() || self.parent.is_some() {
            return Err(NjError::AlreadyAttached {
                label: self.label.clone(),
            });
        }
        self.parent = Some(parent);
        Ok(())
    }

    pub(crate) fn push_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }
}
