//! Error types for grid convolution.

use thiserror::Error;

/// Convolution result type alias.
pub type Result<T> = std::result::Result<T, ConvError>;

/// Errors raised while validating shapes or running work on a compute context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvError {
    /// A grid or window dimension is zero, or its area overflows `usize`.
    #[error("invalid {what} shape {rows}x{cols}: dimensions must be positive and the area must fit in usize")]
    InvalidShape {
        what: &'static str,
        rows: usize,
        cols: usize,
    },

    /// A caller-supplied buffer does not hold exactly one value per cell.
    #[error("buffer holds {actual} values, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// The execution substrate failed while running dispatched tasks.
    #[error("execution fault: {0}")]
    Execution(String),
}
