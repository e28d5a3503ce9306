//! Square, labeled matrix of pairwise distances.

use crate::error::{NjError, Result};
use std::fmt;

/// Float comparison tolerance
pub(crate) const EPSILON: f64 = 1e-7;

// =#========================================================================#=
// DISTANCE MATRIX
// =#========================================================================#=
/// A mutable, square matrix of pairwise distances with one label per
/// row/column.
///
/// Each row is stored together with its label, so a label can never drift
/// away from its distances when entries are inserted or removed.
///
/// # Structure
/// - `size() == labels.len() ==` number of rows `==` number of columns.
/// - Distances are expected to be symmetric, but this is not enforced.
/// - The diagonal conventionally holds 0 but is never required to.
///
/// # Construction
/// Use [DistanceMatrix::new] with explicit rows, [DistanceMatrix::from_fn]
/// with an index-based distance function, or [DistanceMatrix::from_items]
/// with a domain distance function over arbitrary items. All constructors
/// reject empty input, label count mismatches, non-square rows and
/// cells that are NaN, infinite or negative.
///
/// # Example
/// ```
/// use njtree::matrix::DistanceMatrix;
///
/// let matrix = DistanceMatrix::new(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![0.0, 2.0, 4.0], vec![2.0, 0.0, 3.0], vec![4.0, 3.0, 0.0]],
/// ).unwrap();
/// assert_eq!(matrix.size(), 3);
/// assert_eq!(matrix.row_sum(0), 6.0);
/// assert_eq!(matrix.min_entry(), Some((0, 1)));
/// ```
///
/// # Serialization
/// With the `serde` feature, matrices (de)serialize as `{ labels, rows }`
/// and deserialization runs the same checks as [DistanceMatrix::new].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MatrixData", into = "MatrixData")
)]
pub struct DistanceMatrix {
    entries: Vec<MatrixEntry>,
}

/// One row of the matrix paired with its label.
#[derive(Debug, Clone, PartialEq)]
struct MatrixEntry {
    label: String,
    distances: Vec<f64>,
}

/// Serialized form of a [DistanceMatrix].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MatrixData {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixData> for DistanceMatrix {
    type Error = NjError;

    fn try_from(data: MatrixData) -> Result<Self> {
        DistanceMatrix::new(data.labels, data.rows)
    }
}

#[cfg(feature = "serde")]
impl From<DistanceMatrix> for MatrixData {
    fn from(matrix: DistanceMatrix) -> Self {
        let (labels, rows) = matrix
            .entries
            .into_iter()
            .map(|entry| (entry.label, entry.distances))
            .unzip();
        MatrixData { labels, rows }
    }
}

// ============================================================================
// Construction (pub)
// ============================================================================
impl DistanceMatrix {
    /// Creates a matrix from labels and full rows of distances.
    ///
    /// # Arguments
    /// * `labels` - One label per row/column
    /// * `rows` - `labels.len()` rows of `labels.len()` distances each
    ///
    /// # Errors
    /// * [NjError::EmptyMatrix] if there are no rows
    /// * [NjError::LabelCountMismatch] if label and row counts differ
    /// * [NjError::NonSquare] if some row has the wrong length
    /// * [NjError::InvalidDistance] if some cell is NaN, infinite or negative
    pub fn new(labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(NjError::EmptyMatrix);
        }
        if labels.len() != size {
            return Err(NjError::LabelCountMismatch {
                labels: labels.len(),
                size,
            });
        }
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(NjError::NonSquare {
                row,
                len: values.len(),
                size,
            });
        }

        let matrix = DistanceMatrix {
            entries: labels
                .into_iter()
                .zip(rows)
                .map(|(label, distances)| MatrixEntry { label, distances })
                .collect(),
        };
        matrix.validate_distances()?;

        Ok(matrix)
    }

    /// Creates a matrix by evaluating `distance(i, j)` for every off-diagonal
    /// pair of indices. The diagonal is set to 0 without calling `distance`.
    ///
    /// # Errors
    /// Same as [DistanceMatrix::new].
    pub fn from_fn<F>(labels: Vec<String>, mut distance: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let size = labels.len();
        let rows = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| if i == j { 0.0 } else { distance(i, j) })
                    .collect()
            })
            .collect();

        Self::new(labels, rows)
    }

    /// Creates a matrix from arbitrary items and a fallible domain distance
    /// function, with labels taken from `label_of`.
    ///
    /// The distance is evaluated once per ordered off-diagonal pair and the
    /// first error aborts construction.
    ///
    /// # Example
    /// ```
    /// use njtree::error::NjError;
    /// use njtree::matrix::DistanceMatrix;
    ///
    /// let points = [("p", 0.0_f64), ("q", 1.5), ("r", 4.0)];
    /// let matrix = DistanceMatrix::from_items(
    ///     &points,
    ///     |p| p.0.to_string(),
    ///     |a, b| Ok::<_, NjError>((a.1 - b.1).abs()),
    /// ).unwrap();
    /// assert_eq!(matrix.get(0, 2), 4.0);
    /// assert_eq!(matrix.label(1), "q");
    /// ```
    pub fn from_items<T, E, L, D>(items: &[T], label_of: L, mut distance: D) -> std::result::Result<Self, E>
    where
        E: From<NjError>,
        L: Fn(&T) -> String,
        D: FnMut(&T, &T) -> std::result::Result<f64, E>,
    {
        let labels = items.iter().map(&label_of).collect();
        let mut rows = Vec::with_capacity(items.len());
        for (i, a) in items.iter().enumerate() {
            let mut row = Vec::with_capacity(items.len());
            for (j, b) in items.iter().enumerate() {
                row.push(if i == j { 0.0 } else { distance(a, b)? });
            }
            rows.push(row);
        }

        Ok(Self::new(labels, rows)?)
    }

    /// Creates a matrix of zeros without validation, used for derived
    /// matrices such as the Q-matrix whose cells may be negative.
    pub(crate) fn zeros(labels: Vec<String>) -> Self {
        let size = labels.len();
        DistanceMatrix {
            entries: labels
                .into_iter()
                .map(|label| MatrixEntry {
                    label,
                    distances: vec![0.0; size],
                })
                .collect(),
        }
    }
}

// ============================================================================
// Getters / Accessors, etc. (pub)
// ============================================================================
impl DistanceMatrix {
    /// Returns the number of entries, i.e. rows and columns.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the distance at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [size](DistanceMatrix::size).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries[row].distances[col]
    }

    /// Sets the distance at `(row, col)` (only this cell, not its mirror).
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below [size](DistanceMatrix::size).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.entries[row].distances[col] = value;
    }

    /// Returns the distances of row `row`.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.entries[row].distances
    }

    /// Returns the sum across row `row`, diagonal included.
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.entries[row].distances.iter().sum()
    }

    /// Returns the sum across column `col`, diagonal included.
    ///
    /// # Panics
    /// Panics if `col` is out of bounds.
    pub fn col_sum(&self, col: usize) -> f64 {
        self.entries.iter().map(|e| e.distances[col]).sum()
    }

    /// Returns the label of row/column `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn label(&self, index: usize) -> &str {
        &self.entries[index].label
    }

    /// Replaces the label of row/column `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set_label(&mut self, index: usize, label: String) {
        self.entries[index].label = label;
    }

    /// Returns an iterator over all labels in index order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Returns the position of the strictly smallest off-diagonal value,
    /// ties going to the first position in row-major order.
    ///
    /// The diagonal is never a candidate. Returns `None` for matrices with
    /// fewer than two entries.
    pub fn min_entry(&self) -> Option<(usize, usize)> {
        let mut min: Option<(usize, usize, f64)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            for (j, &value) in entry.distances.iter().enumerate() {
                if i == j {
                    continue;
                }
                if min.is_none_or(|(_, _, current)| value < current) {
                    min = Some((i, j, value));
                }
            }
        }

        min.map(|(i, j, _)| (i, j))
    }

    /// Returns the first off-diagonal pair `(i, j)` with `i < j` whose mirrored
    /// values differ by more than `tolerance`, if any.
    pub fn first_asymmetry(&self, tolerance: f64) -> Option<(usize, usize)> {
        let size = self.size();
        (0..size)
            .flat_map(|i| ((i + 1)..size).map(move |j| (i, j)))
            .find(|&(i, j)| (self.get(i, j) - self.get(j, i)).abs() > tolerance)
    }

    /// Returns the first off-diagonal cell in row-major order holding an
    /// infinite or NaN value, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.entries.iter().enumerate().find_map(|(i, entry)| {
            entry
                .distances
                .iter()
                .enumerate()
                .find(|&(j, value)| i != j && !value.is_finite())
                .map(|(j, _)| (i, j))
        })
    }

    /// Returns whether `d(i,j)` and `d(j,i)` agree within [EPSILON] for all pairs.
    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry(EPSILON).is_none()
    }

    /// Checks that all cells are finite and non-negative.
    fn validate_distances(&self) -> Result<()> {
        for (row, entry) in self.entries.iter().enumerate() {
            for (col, &value) in entry.distances.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(NjError::InvalidDistance { row, col, value });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Resizing (pub)
// ============================================================================
impl DistanceMatrix {
    /// Deletes row `index` and column `index`, shrinking the matrix by one.
    ///
    /// Remaining rows and columns keep their relative order, so every index
    /// above `index` shifts down by one. To remove two entries, remove the
    /// larger index first.
    ///
    /// # Returns
    /// The label of the removed entry.
    ///
    /// # Errors
    /// [NjError::IndexOutOfBounds] if `index` is not below the current size.
    pub fn remove_entry(&mut self, index: usize) -> Result<String> {
        let size = self.size();
        if index >= size {
            return Err(NjError::IndexOutOfBounds { index, size });
        }

        let removed = self.entries.remove(index);
        for entry in &mut self.entries {
            entry.distances.remove(index);
        }

        Ok(removed.label)
    }

    /// Appends a new row and column at the final index, growing the matrix by one.
    ///
    /// # Arguments
    /// * `label` - Label of the new entry
    /// * `row` - `size() + 1` distances; value `k` becomes both `(new, k)` and
    ///   `(k, new)`, the last value is the self-distance (typically 0)
    ///
    /// # Errors
    /// [NjError::NonSquare] if `row` does not have `size() + 1` values.
    pub fn insert_entry(&mut self, label: String, row: Vec<f64>) -> Result<()> {
        let new_size = self.size() + 1;
        if row.len() != new_size {
            return Err(NjError::NonSquare {
                row: new_size - 1,
                len: row.len(),
                size: new_size,
            });
        }

        for (entry, &value) in self.entries.iter_mut().zip(&row) {
            entry.distances.push(value);
        }
        self.entries.push(MatrixEntry {
            label,
            distances: row,
        });

        Ok(())
    }
}

impl std::ops::Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.entries[row].distances[col]
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry.label)?;
            for value in &entry.distances {
                write!(f, "\t{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}", (b'A' + i as u8) as char)).collect()
    }

    #[test]
    fn zeros_has_requested_shape() {
        let matrix = DistanceMatrix::zeros(labels(3));
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.row(2), &[0.0, 0.0, 0.0]);
        assert_eq!(matrix.label(2), "C");
    }

    #[test]
    fn min_entry_skips_zero_diagonal() {
        // All off-diagonal values positive, diagonal 0
        let matrix = DistanceMatrix::from_fn(labels(3), |i, j| (i + j) as f64 + 1.0).unwrap();
        assert_eq!(matrix.min_entry(), Some((0, 1)));
    }

    #[test]
    fn min_entry_ties_go_to_first_in_row_major_order() {
        let matrix = DistanceMatrix::from_fn(labels(4), |_, _| 2.0).unwrap();
        assert_eq!(matrix.min_entry(), Some((0, 1)));
    }

    #[test]
    fn min_entry_none_for_single_entry() {
        let matrix = DistanceMatrix::zeros(labels(1));
        assert_eq!(matrix.min_entry(), None);
    }

    #[test]
    fn insert_entry_rejects_wrong_length() {
        let mut matrix = DistanceMatrix::zeros(labels(2));
        let result = matrix.insert_entry("X".into(), vec![1.0, 2.0]);
        assert_eq!(
            result,
            Err(NjError::NonSquare {
                row: 2,
                len: 2,
                size: 3
            })
        );
        assert_eq!(matrix.size(), 2);
    }

    #[test]
    fn first_asymmetry_reports_pair() {
        let mut matrix = DistanceMatrix::from_fn(labels(3), |_, _| 1.0).unwrap();
        assert!(matrix.is_symmetric());
        matrix.set(2, 1, 1.5);
        assert_eq!(matrix.first_asymmetry(EPSILON), Some((1, 2)));
        assert!(!matrix.is_symmetric());
    }
}
