//! Trait for consumers walking a finished [Tree](crate::model::Tree).
//!
//! A [TreeConsumer] receives every node together with its depth in
//! depth-first pre-order, root first. This is the seam for display and
//! export layers, which do not need to know about the arena layout.
//!
//! # Built-in implementations
//! * [IndentRenderer] - one line per node, indented proportionally to depth

use crate::model::node::Node;

/// Indentation used per depth level by default
pub const DEFAULT_BRANCH: &str = "___";

// =#========================================================================#=
// TREE CONSUMER (trait)
// =#========================================================================T=
/// Receives the nodes of a tree during [Tree::walk](crate::model::Tree::walk).
///
/// # Example
/// ```
/// use njtree::model::{Node, Tree, TreeConsumer};
///
/// struct LeafCounter(usize);
///
/// impl TreeConsumer for LeafCounter {
///     fn visit(&mut self, node: &Node, _depth: usize) {
///         if node.is_leaf() {
///             self.0 += 1;
///         }
///     }
/// }
///
/// let mut tree = Tree::new_root("root");
/// let a = tree.add_leaf("A");
/// tree.attach_to_root(a).unwrap();
///
/// let mut counter = LeafCounter(0);
/// tree.walk(&mut counter);
/// assert_eq!(counter.0, 1);
/// ```
pub trait TreeConsumer {
    /// Called once per node; `depth` is 0 for the root.
    fn visit(&mut self, node: &Node, depth: usize);
}

// =#========================================================================#=
// INDENT RENDERER
// =#========================================================================#=
/// Renders a tree as text, one label per line, prefixed by the branch
/// string repeated `depth` times.
#[derive(Debug, Clone)]
pub struct IndentRenderer {
    branch: String,
    output: String,
}

impl IndentRenderer {
    /// Creates a renderer using `branch` as indentation per level.
    pub fn new<S: Into<String>>(branch: S) -> Self {
        IndentRenderer {
            branch: branch.into(),
            output: String::new(),
        }
    }

    /// Returns the text rendered so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consumes the renderer, returning the rendered text.
    pub fn into_string(self) -> String {
        self.output
    }
}

impl Default for IndentRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BRANCH)
    }
}

impl TreeConsumer for IndentRenderer {
    fn visit(&mut self, node: &Node, depth: usize) {
        for _ in 0..depth {
            self.output.push_str(&self.branch);
        }
        self.output.push_str(node.label());
        self.output.push('\n');
    }
}
