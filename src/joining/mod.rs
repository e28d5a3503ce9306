//! Neighbor-joining tree construction.
//!
//! This module implements the neighbor-joining method of Saitou & Nei:
//! starting from a labeled [DistanceMatrix], it repeatedly selects the pair
//! minimizing the [Q-criterion](crate::matrix::q_criterion), merges it into a
//! new internal node, and replaces the pair by that node in the matrix, until
//! two entries remain. These are then attached to a synthetic root.
//!
//! # Quick API
//! * [`crate::neighbor_join`] - run with default settings, returns the [Tree](crate::model::Tree)
//!
//! # Full API
//! * [NeighborJoiningBuilder] - configure root label, label separator,
//!   size cap and symmetry handling
//! * [`NeighborJoining::run`] - run to completion, returns tree and merge history
//! * [`NeighborJoining::reduction`] - obtain a [Reduction] to step manually
//!
//! # Small inputs
//! * 1 entry: the single leaf is attached to the root, no merges
//! * 2 entries: both leaves are attached to the root, no merges
//! * `N >= 3` entries: exactly `N - 2` merges, the root gets two children

pub mod options;
pub mod reduction;

pub use options::{DEFAULT_LABEL_SEPARATOR, JoiningOptions, NeighborJoiningBuilder, Symmetry};
pub use reduction::{JoinOutcome, MergeStep, Reduction};

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use tracing::info;

// =#========================================================================#=
// NEIGHBOR JOINING
// =#========================================================================#=
/// Configured neighbor-joining engine.
///
/// Holds only settings, so one instance can run any number of matrices.
///
/// # Example
/// ```
/// use njtree::joining::NeighborJoining;
/// use njtree::matrix::DistanceMatrix;
///
/// let matrix = DistanceMatrix::new(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![0.0, 5.0, 9.0], vec![5.0, 0.0, 10.0], vec![9.0, 10.0, 0.0]],
/// ).unwrap();
///
/// let outcome = NeighborJoining::new().run(matrix).unwrap();
/// assert_eq!(outcome.steps.len(), 1);
/// assert_eq!(outcome.tree.num_nodes(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NeighborJoining {
    options: JoiningOptions,
}

impl NeighborJoining {
    /// Creates an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given settings.
    pub fn with_options(options: JoiningOptions) -> Self {
        NeighborJoining { options }
    }

    /// Returns a builder to configure an engine.
    pub fn builder() -> NeighborJoiningBuilder {
        NeighborJoiningBuilder::new()
    }

    /// Returns the settings of this engine.
    pub fn options(&self) -> &JoiningOptions {
        &self.options
    }

    /// Sets up a [Reduction] of `matrix` without taking any step.
    ///
    /// # Errors
    /// See [Reduction::new].
    pub fn reduction(&self, matrix: DistanceMatrix) -> Result<Reduction> {
        Reduction::new(matrix, &self.options)
    }

    /// Runs the full reduction on `matrix`.
    ///
    /// # Returns
    /// The finished [Tree](crate::model::Tree) together with the record of every merge.
    ///
    /// # Errors
    /// See [Reduction::new]; no error occurs once the reduction has started
    /// on a validated matrix.
    pub fn run(&self, matrix: DistanceMatrix) -> Result<JoinOutcome> {
        let entries = matrix.size();
        info!(entries, "starting neighbor joining");

        let outcome = self.reduction(matrix)?.finish()?;

        info!(
            entries,
            merges = outcome.steps.len(),
            nodes = outcome.tree.num_nodes(),
            "finished neighbor joining"
        );
        Ok(outcome)
    }
}
