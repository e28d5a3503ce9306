//! The neighbor-joining reduction as an explicit state machine.
//!
//! A [Reduction] holds the live distance matrix, the live node of each
//! matrix entry and the tree under construction. Each [step](Reduction::step)
//! merges one pair and shrinks the matrix by one:
//!
//! ```text
//! size M ──→ Q-matrix ──→ min pair (a,b) ──→ join a,b into AB
//!        ──→ append AB (M+1) ──→ remove max(a,b), min(a,b) ──→ size M-1
//! ```
//!
//! Steps are taken while at least three entries remain. Afterwards
//! [finish](Reduction::finish) attaches the remaining nodes to the root.

use crate::error::{NjError, Result};
use crate::joining::options::{JoiningOptions, Symmetry};
use crate::matrix::distance_matrix::EPSILON;
use crate::matrix::{DistanceMatrix, MIN_Q_SIZE, q_matrix};
use crate::model::{NodeIndex, Tree};
use tracing::{debug, warn};

// =#========================================================================#=
// MERGE STEP
// =#========================================================================#=
/// Record of one reduction step.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    /// 1-based number of this step
    pub step: usize,
    /// Matrix size before the step
    pub size_before: usize,
    /// Matrix indices `(a, b)` of the merged pair, as selected
    pub indices: (usize, usize),
    /// Labels of the merged pair, in the order `a`, `b`
    pub labels: (String, String),
    /// Label of the new internal node
    pub merged_label: String,
    /// Index of the new internal node in the tree
    pub node: NodeIndex,
    /// Q-score of the selected pair
    pub q_score: f64,
    /// Distance between the merged pair
    pub pair_distance: f64,
}

// =#========================================================================#=
// ACTIVE SET
// =#========================================================================#=
/// Matrix entries paired with their live tree nodes.
///
/// Entry `i` of the matrix always belongs to `nodes[i]`; both are only
/// changed together.
#[derive(Debug, Clone)]
struct ActiveSet {
    matrix: DistanceMatrix,
    nodes: Vec<NodeIndex>,
}

impl ActiveSet {
    fn len(&self) -> usize {
        debug_assert_eq!(self.matrix.size(), self.nodes.len());
        self.nodes.len()
    }

    /// Appends a new entry at the final index.
    fn push(&mut self, node: NodeIndex, label: String, row: Vec<f64>) -> Result<()> {
        self.matrix.insert_entry(label, row)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Removes the entries at `a` and `b`, larger index first.
    fn remove_pair(&mut self, a: usize, b: usize) -> Result<()> {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        for index in [high, low] {
            self.matrix.remove_entry(index)?;
            self.nodes.remove(index);
        }
        Ok(())
    }
}

// =#========================================================================#=
// REDUCTION
// =#========================================================================#=
/// State of one neighbor-joining run.
///
/// Usually driven by [NeighborJoining::run](crate::joining::NeighborJoining::run),
/// but can be stepped manually to inspect intermediate matrices.
///
/// # Example
/// ```
/// use njtree::joining::NeighborJoining;
/// use njtree::matrix::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_fn(
///     vec!["A".into(), "B".into(), "C".into(), "D".into()],
///     |i, j| if i / 2 == j / 2 { 1.0 } else { 4.0 },
/// ).unwrap();
///
/// let mut reduction = NeighborJoining::new().reduction(matrix).unwrap();
/// while let Some(step) = reduction.step().unwrap() {
///     assert_eq!(reduction.matrix().size(), step.size_before - 1);
/// }
/// assert_eq!(reduction.steps_taken(), 2);
/// let outcome = reduction.finish().unwrap();
/// assert_eq!(outcome.tree.root().children().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Reduction {
    active: ActiveSet,
    tree: Tree,
    separator: String,
    steps: Vec<MergeStep>,
}

/// Result of a finished [Reduction].
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// The final tree
    pub tree: Tree,
    /// All merges in the order they happened
    pub steps: Vec<MergeStep>,
}

impl Reduction {
    /// Validates `matrix` against `options` and sets up the initial state:
    /// one leaf per label, all detached.
    ///
    /// # Errors
    /// * [NjError::EmptyMatrix] if `matrix` has no entries
    /// * [NjError::TooManyEntries] if the size exceeds the configured cap
    /// * [NjError::Asymmetric] if asymmetric under [Symmetry::Enforce]
    pub fn new(matrix: DistanceMatrix, options: &JoiningOptions) -> Result<Self> {
        let size = matrix.size();
        if size == 0 {
            return Err(NjError::EmptyMatrix);
        }
        if let Some(max) = options.max_entries.filter(|&max| size > max) {
            return Err(NjError::TooManyEntries { size, max });
        }
        let asymmetry = match options.symmetry {
            Symmetry::Ignore => None,
            Symmetry::Warn | Symmetry::Enforce => matrix.first_asymmetry(EPSILON),
        };
        if let Some((row, col)) = asymmetry {
            let forward = matrix.get(row, col);
            let backward = matrix.get(col, row);
            if options.symmetry == Symmetry::Enforce {
                return Err(NjError::Asymmetric {
                    row,
                    col,
                    forward,
                    backward,
                });
            }
            warn!(row, col, forward, backward, "distance matrix is not symmetric");
        }

        let mut tree = Tree::new_root(options.root_label.clone());
        let nodes = matrix.labels().map(|label| tree.add_leaf(label)).collect();

        Ok(Reduction {
            active: ActiveSet { matrix, nodes },
            tree,
            separator: options.label_separator.clone(),
            steps: Vec::new(),
        })
    }

    /// Returns the live distance matrix.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.active.matrix
    }

    /// Returns the live node of each matrix entry, in matrix index order.
    pub fn live_nodes(&self) -> &[NodeIndex] {
        &self.active.nodes
    }

    /// Returns the tree under construction.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Returns the merges performed so far.
    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// Returns the number of merges performed so far.
    pub fn steps_taken(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether no further step is possible, i.e. fewer than three
    /// entries remain.
    pub fn is_finished(&self) -> bool {
        self.active.len() < MIN_Q_SIZE
    }

    /// Performs one reduction step.
    ///
    /// # Returns
    /// The record of the merge, or `None` if the reduction is
    /// [finished](Reduction::is_finished).
    ///
    /// # Errors
    /// [NjError::NonFiniteDistance] if a Q-score or a reduced distance
    /// overflows; the state is left as before the step.
    pub fn step(&mut self) -> Result<Option<MergeStep>> {
        if self.is_finished() {
            return Ok(None);
        }

        let size = self.active.len();
        let step = self.steps.len() + 1;
        let q = q_matrix(&self.active.matrix);
        if let Some((row, col)) = q.first_non_finite() {
            return Err(NjError::NonFiniteDistance { step, row, col });
        }
        let Some((a, b)) = q.min_entry() else {
            return Ok(None);
        };
        let q_score = q.get(a, b);

        // Distances from the merged node to every entry, self-distance last
        let matrix = &self.active.matrix;
        let pair_distance = matrix.get(a, b);
        let mut row: Vec<f64> = (0..size)
            .map(|k| {
                if k == a || k == b {
                    0.0
                } else {
                    (matrix.get(a, k) + matrix.get(b, k) - pair_distance) / 2.0
                }
            })
            .collect();
        if let Some(col) = row.iter().position(|d| !d.is_finite()) {
            return Err(NjError::NonFiniteDistance { step, row: size, col });
        }
        row.push(0.0);

        let node_a = self.active.nodes[a];
        let node_b = self.active.nodes[b];
        let merged = self.tree.join(node_a, node_b, &self.separator)?;
        let merged_label = self.tree[merged].label().to_string();

        let record = MergeStep {
            step,
            size_before: size,
            indices: (a, b),
            labels: (matrix.label(a).to_string(), matrix.label(b).to_string()),
            merged_label: merged_label.clone(),
            node: merged,
            q_score,
            pair_distance,
        };

        self.active.push(merged, merged_label, row)?;
        self.active.remove_pair(a, b)?;

        debug!(
            step = record.step,
            a,
            b,
            q_score,
            merged = %record.merged_label,
            remaining = self.active.len(),
            "joined neighbors"
        );

        self.steps.push(record.clone());
        Ok(Some(record))
    }

    /// Runs all remaining steps, then attaches every live node to the root.
    pub fn finish(mut self) -> Result<JoinOutcome> {
        while self.step()?.is_some() {}

        for &node in &self.active.nodes {
            self.tree.attach_to_root(node)?;
        }

        Ok(JoinOutcome {
            tree: self.tree,
            steps: self.steps,
        })
    }
}
