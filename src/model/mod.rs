//! Data model for clustering trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node]s referenced by [NodeIndex]. Each node is either the synthetic
//! `Root`, an `Internal` merge node or an original `Leaf` (see [NodeKind]).
//!
//! # Building trees
//! The [joining](crate::joining) module builds trees bottom-up:
//! 1. [Tree::add_leaf] once per input entity
//! 2. [Tree::join] once per reduction step
//! 3. [Tree::attach_to_root] for the entities left at the end
//!
//! # Consuming trees
//! [Tree::traverse] yields `(node, depth)` pairs in depth-first order, and
//! [Tree::walk] feeds the same sequence to a [TreeConsumer] such as
//! [IndentRenderer].

pub mod node;
pub mod tree;
pub mod tree_consumer;

pub use node::{Node, NodeIndex, NodeKind};
pub use tree::{DEFAULT_ROOT_LABEL, DepthFirstIter, PostOrderIter, Tree};
pub use tree_consumer::{IndentRenderer, TreeConsumer};
