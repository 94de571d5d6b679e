//! Sliding-window convolution implementations.
//!
//! Provides two paths computing the same edge-clipped window reduction: a scalar
//! reference and a per-cell parallel version dispatched through a compute context.

mod parallel;
mod scalar;

pub use parallel::{conv2d_parallel, conv2d_parallel_into};
pub use scalar::{conv2d_scalar, conv2d_scalar_into};

use std::fmt;

use crate::context::ComputeContext;
use crate::error::{ConvError, Result};
use crate::grid::Grid;

/// Selects which convolution path to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvAlgorithm {
    /// Single-threaded nested loops (reference implementation).
    Scalar,
    /// One independent task per output cell on the compute context.
    Parallel,
}

impl fmt::Display for ConvAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvAlgorithm::Scalar => write!(f, "scalar"),
            ConvAlgorithm::Parallel => write!(f, "parallel"),
        }
    }
}

/// Dispatch convolution to the selected algorithm.
///
/// The scalar path ignores `ctx` and always runs on the calling thread.
pub fn conv2d(
    algorithm: ConvAlgorithm,
    ctx: &ComputeContext,
    grid: &Grid,
    kernel: &Grid,
) -> Result<Grid> {
    match algorithm {
        ConvAlgorithm::Scalar => conv2d_scalar(grid, kernel),
        ConvAlgorithm::Parallel => conv2d_parallel(ctx, grid, kernel),
    }
}

/// Validates shapes before any work is done: non-empty grid and window, and an
/// output with the grid's shape.
pub(crate) fn check_operands(grid: &Grid, kernel: &Grid, out: &Grid) -> Result<()> {
    grid.shape().validate("grid")?;
    kernel.shape().validate("window")?;
    if out.shape() != grid.shape() {
        return Err(ConvError::BufferSize {
            expected: grid.len(),
            actual: out.len(),
        });
    }
    Ok(())
}
