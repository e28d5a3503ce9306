//! Provides the clustering tree built by neighbor joining.
//!
//! * [Tree] - arena of [Node]s rooted at a synthetic root
//! * [DepthFirstIter] - lazy pre-order traversal yielding `(node, depth)`
//! * [PostOrderIter] - children-before-parent traversal

use crate::error::{NjError, Result};
use crate::model::node::{Node, NodeIndex};
use crate::model::tree_consumer::{IndentRenderer, TreeConsumer};

/// Default label of the synthetic root
pub const DEFAULT_ROOT_LABEL: &str = "root";

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A hierarchical clustering tree represented using the arena pattern on
/// [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex];
/// the parent link of a node is a non-owning index, the children list
/// holds the owned subtrees.
///
/// # Structure
/// - The root is created with the tree and sits at index 0.
/// - Leaves are added detached, then merged pairwise via [Tree::join] into
///   internal nodes, and finally hooked under the root via
///   [Tree::attach_to_root].
/// - No node is ever removed; the tree keeps the full merge history.
///
/// # Example
/// ```
/// use njtree::model::Tree;
///
/// let mut tree = Tree::new_root("root");
/// let a = tree.add_leaf("A");
/// let b = tree.add_leaf("B");
/// let c = tree.add_leaf("C");
/// let ab = tree.join(a, b, "_").unwrap();
/// tree.attach_to_root(ab).unwrap();
/// tree.attach_to_root(c).unwrap();
///
/// let labels: Vec<_> = tree.traverse().map(|(n, d)| (n.label(), d)).collect();
/// assert_eq!(labels, vec![("root", 0), ("A_B", 1), ("A", 2), ("B", 2), ("C", 1)]);
/// ```
///
/// # Serialization
/// With the `serde` feature, deserialized trees are checked with
/// [Tree::check_links].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TreeData")
)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: NodeIndex,
}

/// Unchecked form of a [Tree] as read by serde.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TreeData {
    nodes: Vec<Node>,
    root_index: NodeIndex,
}

#[cfg(feature = "serde")]
impl TryFrom<TreeData> for Tree {
    type Error = NjError;

    fn try_from(data: TreeData) -> Result<Self> {
        let tree = Tree {
            nodes: data.nodes,
            root_index: data.root_index,
        };
        tree.check_links()?;
        Ok(tree)
    }
}

// ============================================================================
// New, Construction (pub)
// ============================================================================
impl Tree {
    /// Creates a tree with a single root node and no children.
    pub fn new_root<S: Into<String>>(label: S) -> Self {
        Tree {
            nodes: vec![Node::new_root(0, label.into())],
            root_index: 0,
        }
    }

    /// Adds a detached leaf and returns its index.
    pub fn add_leaf<S: Into<String>>(&mut self, label: S) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new_leaf(index, label.into()));
        index
    }

    /// Merges two detached nodes into a new internal node.
    ///
    /// The new node is labeled `"{a}{separator}{b}"`, owns `a` then `b` as
    /// children and becomes their parent.
    ///
    /// # Errors
    /// * [NjError::IndexOutOfBounds] if either index is not in the tree
    /// * [NjError::AlreadyAttached] if `a == b`, or either is the root or
    ///   already has a parent
    ///
    /// Nothing is modified when an error is returned.
    pub fn join(&mut self, a: NodeIndex, b: NodeIndex, separator: &str) -> Result<NodeIndex> {
        self.check_detached(a)?;
        self.check_detached(b)?;
        if a == b {
            return Err(NjError::AlreadyAttached {
                label: self.nodes[a].label().to_string(),
            });
        }

        let index = self.nodes.len();
        let label = format!("{}{}{}", self.nodes[a].label(), separator, self.nodes[b].label());
        self.nodes.push(Node::new_internal(index, label, vec![a, b]));
        self.nodes[a].set_parent(index)?;
        self.nodes[b].set_parent(index)?;

        Ok(index)
    }

    /// Appends `node` as the next child of the root.
    ///
    /// # Errors
    /// * [NjError::IndexOutOfBounds] if `node` is not in the tree
    /// * [NjError::AlreadyAttached] if `node` is the root or already has a parent
    pub fn attach_to_root(&mut self, node: NodeIndex) -> Result<()> {
        self.check_detached(node)?;
        let root = self.root_index;
        self.nodes[node].set_parent(root)?;
        self.nodes[root].push_child(node);
        Ok(())
    }

    fn check_detached(&self, index: NodeIndex) -> Result<()> {
        let node = self.nodes.get(index).ok_or(NjError::IndexOutOfBounds {
            index,
            size: self.nodes.len(),
        })?;
        if node.is_root() || node.has_parent() {
            return Err(NjError::AlreadyAttached {
                label: node.label().to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Returns a reference to the root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeIndex {
        self.root_index
    }

    /// Returns the node at `index`, or `None` if out of bounds.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns all nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the number of nodes, root included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the number of internal (merge) nodes.
    pub fn num_internal(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_internal()).count()
    }

    /// Returns the leaf labels in traversal order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.traverse()
            .filter(|(n, _)| n.is_leaf())
            .map(|(n, _)| n.label())
            .collect()
    }

    /// Returns the largest depth of any node reachable from the root
    /// (the root itself has depth 0).
    pub fn depth(&self) -> usize {
        self.traverse().map(|(_, d)| d).max().unwrap_or(0)
    }

    /// Returns the indices of non-root nodes without a parent, i.e. nodes not
    /// (yet) reachable from the root.
    pub fn detached(&self) -> Vec<NodeIndex> {
        self.nodes
            .iter()
            .filter(|n| !n.is_root() && !n.has_parent())
            .map(|n| n.index())
            .collect()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - All links (see [Tree::check_links])
    /// - Every node is reachable from the root exactly once
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.check_links().is_err() {
            return false;
        }

        // Each node reached exactly once
        let mut seen = vec![false; self.nodes.len()];
        for (node, _) in self.traverse() {
            if seen[node.index()] {
                return false;
            }
            seen[node.index()] = true;
        }
        seen.into_iter().all(|s| s)
    }

    /// Checks the local consistency of every node, allowing nodes that are
    /// not attached yet.
    ///
    /// Checks:
    /// - All node indices match their position in the arena
    /// - Exactly one root, at the root index, without parent
    /// - Every parent lists its child, every child points back to its parent
    /// - Leaves have no children, internal nodes have exactly two
    ///
    /// # Errors
    /// [NjError::InconsistentTree] naming the first offending node.
    pub fn check_links(&self) -> Result<()> {
        let num_nodes = self.nodes.len();
        let inconsistent =
            |index: NodeIndex| -> Result<()> { Err(NjError::InconsistentTree { index }) };
        let root = self.nodes.get(self.root_index);
        if !root.is_some_and(|r| r.is_root() && !r.has_parent()) {
            return inconsistent(self.root_index);
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index || node.is_root() != (index == self.root_index) {
                return inconsistent(index);
            }
            let orphaned = node
                .parent()
                .is_some_and(|p| p >= num_nodes || !self.nodes[p].children().contains(&index));
            if orphaned {
                return inconsistent(index);
            }
            if node.is_leaf() && !node.children().is_empty() {
                return inconsistent(index);
            }
            if node.is_internal() && node.children().len() != 2 {
                return inconsistent(index);
            }
            for &child in node.children() {
                if child >= num_nodes || self.nodes[child].parent() != Some(index) {
                    return inconsistent(index);
                }
            }
        }
        Ok(())
    }
}

impl std::ops::Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

// ============================================================================
// Consuming / Printing (pub)
// ============================================================================
impl Tree {
    /// Feeds every node reachable from the root to `consumer`, in
    /// [traversal](Tree::traverse) order.
    pub fn walk<C: TreeConsumer>(&self, consumer: &mut C) {
        for (node, depth) in self.traverse() {
            consumer.visit(node, depth);
        }
    }

    /// Renders the tree with one line per node, indented by `___` per level.
    ///
    /// # Example Output
    /// ```text
    /// root
    /// ___A_B
    /// ______A
    /// ______B
    /// ___C
    /// ```
    pub fn render(&self) -> String {
        let mut renderer = IndentRenderer::default();
        self.walk(&mut renderer);
        renderer.into_string()
    }

    /// Prints the [rendered](Tree::render) tree to the console.
    pub fn print_tree(&self) {
        println!("\n******** TREE *******");
        print!("{}", self.render());
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns a lazy depth-first (pre-order) iterator over `(node, depth)`,
    /// root first with depth 0, children in their stored order.
    ///
    /// Only nodes reachable from the root are visited. Each call starts a
    /// fresh traversal.
    pub fn traverse(&self) -> DepthFirstIter<'_> {
        DepthFirstIter {
            tree: self,
            stack: vec![(self.root_index, 0)],
        }
    }

    /// Returns an iterator over the nodes reachable from the root in
    /// post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter {
            tree: self,
            stack: vec![(self.root_index, false)],
        }
    }
}

/// Iterator for depth-first pre-order traversal yielding `(node, depth)`.
///
/// Uses an explicit stack, so the tree depth is not bounded by recursion.
pub struct DepthFirstIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeIndex, usize)>,
}

impl<'a> Iterator for DepthFirstIter<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, depth) = self.stack.pop()?;
        let node = &self.tree[index];

        // Push children in reverse so the first child is visited first
        for &child in node.children().iter().rev() {
            self.stack.push((child, depth + 1));
        }

        Some((node, depth))
    }
}

/// Iterator for post-order traversal (children before parents).
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.children().is_empty() {
                return Some(node);
            }

            self.stack.push((index, true));
            for &child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}
