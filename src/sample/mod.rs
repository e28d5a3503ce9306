//! Color samples and their distance function.
//!
//! A [Sample] is a labeled sequence of [ColorElement]s. Two samples of equal
//! length are compared element by element, and [cluster_samples] feeds the
//! resulting distances into neighbor joining.

pub mod color;

pub use color::ColorElement;

use crate::error::{NjError, SampleError};
use crate::joining::NeighborJoining;
use crate::matrix::DistanceMatrix;
use crate::model::Tree;

// =#========================================================================#=
// SAMPLE
// =#========================================================================#=
/// A labeled sequence of colored elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    label: String,
    elements: Vec<ColorElement>,
}

impl Sample {
    /// Creates a sample without elements.
    pub fn new<S: Into<String>>(label: S) -> Self {
        Sample {
            label: label.into(),
            elements: Vec::new(),
        }
    }

    /// Creates a sample from the given elements.
    pub fn with_elements<S: Into<String>>(label: S, elements: Vec<ColorElement>) -> Self {
        Sample {
            label: label.into(),
            elements,
        }
    }

    /// Appends an element.
    pub fn push(&mut self, element: ColorElement) {
        self.elements.push(element);
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the elements in order.
    pub fn elements(&self) -> &[ColorElement] {
        &self.elements
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the sample has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the mean [distance](ColorElement::distance) of elements at
    /// equal positions.
    ///
    /// # Errors
    /// * [SampleError::LengthMismatch] if the samples differ in length
    /// * [SampleError::Empty] if the samples have no elements
    pub fn distance(&self, other: &Sample) -> Result<f64, SampleError> {
        if self.len() != other.len() {
            return Err(SampleError::LengthMismatch {
                left: self.label.clone(),
                left_len: self.len(),
                right: other.label.clone(),
                right_len: other.len(),
            });
        }
        if self.is_empty() {
            return Err(SampleError::Empty(self.label.clone()));
        }

        let total: f64 = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| b.distance(a))
            .sum();
        Ok(total / self.len() as f64)
    }
}

/// Builds the pairwise distance matrix of `samples`, labeled by sample label.
///
/// # Errors
/// [NjError::EmptyMatrix] for no samples, [NjError::Sample] if two samples
/// cannot be compared.
pub fn distance_matrix(samples: &[Sample]) -> Result<DistanceMatrix, NjError> {
    DistanceMatrix::from_items(
        samples,
        |s| s.label.clone(),
        |a, b| a.distance(b).map_err(NjError::from),
    )
}

/// Clusters `samples` by neighbor joining with default settings.
///
/// # Example
/// ```
/// use njtree::sample::{cluster_samples, ColorElement, Sample};
///
/// let red = ColorElement::from_rgb(255, 0, 0).unwrap();
/// let blue = ColorElement::from_rgb(0, 0, 255).unwrap();
/// let samples = vec![
///     Sample::with_elements("sp1", vec![red, red]),
///     Sample::with_elements("sp2", vec![red, blue]),
///     Sample::with_elements("sp3", vec![blue, blue]),
/// ];
///
/// let tree = cluster_samples(&samples).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn cluster_samples(samples: &[Sample]) -> Result<Tree, NjError> {
    let matrix = distance_matrix(samples)?;
    Ok(NeighborJoining::new().run(matrix)?.tree)
}
