//! Error types for distance matrices, tree construction and samples.
//!
//! This module provides [NjError], the single error type returned by the
//! library, and [SampleError] for the color sample distance function.

use thiserror::Error;

// =#========================================================================#=
// NJ ERROR
// =#========================================================================$=
/// Errors that can occur while building a distance matrix, running the
/// neighbor-joining reduction or assembling a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NjError {
    /// Matrix without any entries
    #[error("distance matrix has no entries")]
    EmptyMatrix,

    /// Number of labels differs from the number of rows
    #[error("got {labels} labels for a matrix with {size} rows")]
    LabelCountMismatch { labels: usize, size: usize },

    /// A row has a different length than the number of rows
    #[error("row {row} has {len} values, expected {size} (matrix must be square)")]
    NonSquare { row: usize, len: usize, size: usize },

    /// Cell holding NaN, an infinite or a negative value
    #[error("invalid distance {value} at ({row}, {col})")]
    InvalidDistance { row: usize, col: usize, value: f64 },

    /// d(i,j) differs from d(j,i) by more than the tolerance
    #[error("distances at ({row}, {col}) and ({col}, {row}) differ: {forward} vs {backward}")]
    Asymmetric {
        row: usize,
        col: usize,
        forward: f64,
        backward: f64,
    },

    /// Input exceeds the configured size cap
    #[error("matrix of size {size} exceeds configured maximum of {max} entries")]
    TooManyEntries { size: usize, max: usize },

    /// Q-score or reduced distance overflowed to an infinite or NaN value
    #[error("non-finite value at ({row}, {col}) in reduction step {step}")]
    NonFiniteDistance { step: usize, row: usize, col: usize },

    /// Index does not address a current row/column or node
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Node already has a parent and cannot be attached again
    #[error("node '{label}' already has a parent")]
    AlreadyAttached { label: String },

    /// Parent and child links of a tree disagree, e.g. after deserialization
    #[error("tree links are inconsistent at node {index}")]
    InconsistentTree { index: usize },

    /// Failure of the sample distance function
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NjError>;

// =#========================================================================#=
// SAMPLE ERROR
// =#========================================================================$=
/// Errors raised when constructing color elements or comparing samples.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// RGB channel outside of `0..=255`
    #[error("RGB values must lie within 0 and 255, got ({r}, {g}, {b})")]
    InvalidRgb { r: i32, g: i32, b: i32 },

    /// HSV component outside of its unit range
    #[error("HSV values must lie within 0 and 1 (hue below 1), got ({h}, {s}, {v})")]
    InvalidHsv { h: f64, s: f64, v: f64 },

    /// Samples of different lengths cannot be compared
    #[error("samples '{left}' ({left_len}) and '{right}' ({right_len}) differ in length")]
    LengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    /// Sample without elements
    #[error("sample '{0}' has no elements")]
    Empty(String),
}
