//! Distance matrices and the Q-criterion.
//!
//! * [DistanceMatrix] - square labeled matrix supporting row/column sums,
//!   removal and insertion of entries, and minimum off-diagonal lookup
//! * [q_matrix] - transformation of a distance matrix into Q-scores

pub mod distance_matrix;
pub mod q_criterion;

pub use distance_matrix::DistanceMatrix;
pub use q_criterion::{MIN_Q_SIZE, q_matrix};
