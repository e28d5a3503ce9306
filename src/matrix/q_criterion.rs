//! Q-criterion used by neighbor joining to select the next pair to merge.
//!
//! For a distance matrix `D` with `N` entries, the Q-matrix holds for every
//! off-diagonal pair `(i, j)`:
//!
//! ```text
//! Q(i,j) = (N - 2) * D(i,j) - rowSum(i) - colSum(j)
//! ```
//!
//! The diagonal of `Q` stays 0 and is never a merge candidate,
//! see [DistanceMatrix::min_entry].

use crate::matrix::DistanceMatrix;
use tracing::trace;

/// Minimum number of entries for which the Q-criterion is defined.
pub const MIN_Q_SIZE: usize = 3;

/// Computes the Q-matrix of `distances`.
///
/// Row and column sums are computed once per index and reused for all pairs.
/// The returned matrix carries the same labels as `distances`.
///
/// # Panics
/// Panics in debug builds if `distances` has fewer than [MIN_Q_SIZE] entries;
/// the reduction never calls this below that size.
pub fn q_matrix(distances: &DistanceMatrix) -> DistanceMatrix {
    let n = distances.size();
    debug_assert!(n >= MIN_Q_SIZE, "Q-criterion undefined for {n} entries");

    let row_sums: Vec<f64> = (0..n).map(|i| distances.row_sum(i)).collect();
    let col_sums: Vec<f64> = (0..n).map(|j| distances.col_sum(j)).collect();
    let factor = n as f64 - 2.0;

    let mut q = DistanceMatrix::zeros(distances.labels().map(str::to_string).collect());
    for i in 0..n {
        for j in 0..n {
            if i != j {
                q.set(i, j, factor * distances.get(i, j) - row_sums[i] - col_sums[j]);
            }
        }
    }

    trace!(size = n, "computed Q-matrix");
    q
}
