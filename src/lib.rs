//! Njtree is a library to cluster labeled entities into a tree from their
//! pairwise distances, using the Neighbor-Joining method.
//!
//! Core functionality provided:
//! - Distance matrix: [DistanceMatrix] holds square, labeled distances and
//!   supports row/column sums, removal and insertion of entries and
//!   minimum off-diagonal lookup.
//! - Q-criterion: [q_matrix](matrix::q_matrix) scores every pair, penalizing
//!   pairs far from the rest of the set.
//! - Neighbor joining: [NeighborJoining] repeatedly merges the pair with the
//!   lowest Q-score until two entries remain, which are then attached to a
//!   synthetic root.
//! - Tree model: [Tree] stores all leaves and merge nodes in an arena and
//!   offers a lazy depth-first traversal for display or export.
//! - Samples: [Sample] and [ColorElement](sample::ColorElement) provide a
//!   color-based distance function as an example input.
//!
//! Limitations:
//! - Strictly sequential, in-memory computation
//! - Merged nodes carry concatenated labels, no branch lengths
//!
//! # Usage patterns
//! 1. [neighbor_join] runs with default settings.
//! 2. Configure an engine with
//!    [NeighborJoiningBuilder](joining::NeighborJoiningBuilder) for a custom
//!    root label, label separator, size cap or symmetry check, or step
//!    through a [Reduction](joining::Reduction) manually.
//!
//! ## Example Default Configuration
//! ```
//! use njtree::{neighbor_join, DistanceMatrix};
//!
//! let labels = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
//! let matrix = DistanceMatrix::new(labels, vec![
//!     vec![0.0, 5.0, 9.0, 9.0, 8.0],
//!     vec![5.0, 0.0, 10.0, 10.0, 9.0],
//!     vec![9.0, 10.0, 0.0, 8.0, 7.0],
//!     vec![9.0, 10.0, 8.0, 0.0, 3.0],
//!     vec![8.0, 9.0, 7.0, 3.0, 0.0],
//! ])?;
//!
//! let tree = neighbor_join(matrix)?;
//! assert_eq!(tree.num_leaves(), 5);
//! assert_eq!(tree.root().children().len(), 2);
//! # Ok::<(), njtree::NjError>(())
//! ```
//!
//! ## Example Engine Configuration
//! ```
//! use njtree::joining::{NeighborJoiningBuilder, Symmetry};
//! use njtree::DistanceMatrix;
//!
//! let matrix = DistanceMatrix::from_fn(
//!     vec!["x".into(), "y".into(), "z".into()],
//!     |i, j| (i as f64 - j as f64).abs(),
//! )?;
//!
//! let outcome = NeighborJoiningBuilder::new()
//!     .with_root_label("all")
//!     .with_symmetry(Symmetry::Enforce)
//!     .build()
//!     .run(matrix)?;
//! println!("{}", outcome.tree.render());
//! # Ok::<(), njtree::NjError>(())
//! ```

pub mod error;
pub mod joining;
pub mod matrix;
pub mod model;
pub mod sample;

pub use crate::error::{NjError, Result, SampleError};
pub use crate::joining::NeighborJoining;
pub use crate::matrix::DistanceMatrix;
pub use crate::model::{Node, Tree};
pub use crate::sample::{Sample, cluster_samples};

// ============================================================================
// Quick API
// ============================================================================
/// Clusters the entries of `matrix` by neighbor joining using default
/// settings, returning the finished [Tree].
///
/// See [NeighborJoining::run] for the full result including merge history.
pub fn neighbor_join(matrix: DistanceMatrix) -> Result<Tree> {
    Ok(NeighborJoining::new().run(matrix)?.tree)
}
