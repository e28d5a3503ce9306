//! Configuration of a neighbor-joining run.
//!
//! This module provides [NeighborJoiningBuilder] to configure and create a
//! [NeighborJoining] instance, and [Symmetry] to choose how asymmetric
//! input matrices are treated.

use crate::joining::NeighborJoining;
use crate::model::DEFAULT_ROOT_LABEL;

/// Default separator placed between the labels of a merged pair
pub const DEFAULT_LABEL_SEPARATOR: &str = "_";

// =#========================================================================#=
// SYMMETRY
// =#========================================================================€=
/// How to treat input matrices where `d(i,j)` and `d(j,i)` differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symmetry {
    /// Accept any input without checking (default)
    #[default]
    Ignore,
    /// Accept asymmetric input but log a warning
    Warn,
    /// Reject asymmetric input with [NjError::Asymmetric](crate::error::NjError::Asymmetric)
    Enforce,
}

// =#========================================================================#=
// OPTIONS
// =#========================================================================$=
/// Settings shared by [NeighborJoining] and the [Reduction](crate::joining::Reduction)s it creates.
#[derive(Debug, Clone, PartialEq)]
pub struct JoiningOptions {
    /// Label of the synthetic root
    pub root_label: String,
    /// Separator between the labels of a merged pair
    pub label_separator: String,
    /// Largest accepted input size, if capped
    pub max_entries: Option<usize>,
    /// Treatment of asymmetric input
    pub symmetry: Symmetry,
}

impl Default for JoiningOptions {
    fn default() -> Self {
        JoiningOptions {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            label_separator: DEFAULT_LABEL_SEPARATOR.to_string(),
            max_entries: None,
            symmetry: Symmetry::Ignore,
        }
    }
}

// =#========================================================================#=
// BUILDER
// =#========================================================================$=
/// Builder for configuring and creating a [NeighborJoining] instance.
///
/// # Defaults
/// * Root label `"root"`
/// * Label separator `"_"`
/// * No size cap
/// * [Symmetry::Ignore]
///
/// # Example
/// ```
/// use njtree::joining::{NeighborJoiningBuilder, Symmetry};
///
/// let nj = NeighborJoiningBuilder::new()
///     .with_root_label("samples")
///     .with_label_separator("+")
///     .with_max_entries(1_000)
///     .with_symmetry(Symmetry::Enforce)
///     .build();
/// assert_eq!(nj.options().root_label, "samples");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NeighborJoiningBuilder {
    options: JoiningOptions,
}

impl NeighborJoiningBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label of the synthetic root.
    pub fn with_root_label<S: Into<String>>(mut self, label: S) -> Self {
        self.options.root_label = label.into();
        self
    }

    /// Sets the separator placed between the labels of a merged pair.
    pub fn with_label_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.options.label_separator = separator.into();
        self
    }

    /// Caps the input size; larger matrices are rejected before any work is
    /// done with [NjError::TooManyEntries](crate::error::NjError::TooManyEntries).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.options.max_entries = Some(max_entries);
        self
    }

    /// Sets how asymmetric input is treated.
    pub fn with_symmetry(mut self, symmetry: Symmetry) -> Self {
        self.options.symmetry = symmetry;
        self
    }

    /// Builds the configured [NeighborJoining].
    pub fn build(self) -> NeighborJoining {
        NeighborJoining::with_options(self.options)
    }
}
