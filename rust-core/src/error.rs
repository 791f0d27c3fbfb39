//! Errors raised at the transform call boundary

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    #[error("Convolution operands differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("Axis {axis} of the input has zero length")]
    EmptyInput { axis: usize },

    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedInput {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Shape {dims:?} holds {expected} elements but {actual} were given")]
    ShapeMismatch {
        dims: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),
}
