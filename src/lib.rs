//! Edge-clipped 2D sliding-window convolution on a parallel compute context.
//!
//! This crate computes a windowed reduction over a row-major `f32` grid twice: once
//! with one independent task per output cell on a [`ComputeContext`], and once with a
//! scalar reference loop. Both paths accumulate in the same order, so their results
//! are bit-identical and can be compared with [`metrics::compare_grids`].
//!
//! The window is anchored at its top-left corner on the output cell. Terms past the
//! grid edge are dropped, but every cell is divided by the full window area, so
//! border cells are under-normalized. This asymmetric normalization is kept as-is.
//!
//! A small weighted-statistics module reuses the same context for elementwise
//! products.
//!
//! # Example
//!
//! ```
//! use gridconv::{conv2d_parallel, conv2d_scalar, initialize, ComputeContext, Shape};
//!
//! let ws = initialize(Shape::new(8, 8), Shape::new(3, 3), 100).unwrap();
//! let ctx = ComputeContext::rayon(Some(2)).unwrap();
//! let parallel = conv2d_parallel(&ctx, &ws.grid, &ws.kernel).unwrap();
//! let scalar = conv2d_scalar(&ws.grid, &ws.kernel).unwrap();
//! assert_eq!(parallel, scalar);
//! ```

/// Error types.
pub mod error;
/// Row-major 2D `f32` grids and their shapes.
pub mod grid;
/// Seeded grid and kernel initialization.
pub mod init;
/// Compute contexts (rayon thread pool or sequential).
pub mod context;
/// Scalar and parallel sliding-window convolution.
pub mod conv;
/// Timing and result comparison.
pub mod metrics;
/// Weighted moments and linear regression.
pub mod stats;
/// Driver arguments, run configuration and logging setup.
pub mod cli;

pub use context::{Backend, ComputeContext, ContextInfo};
pub use conv::{conv2d, conv2d_parallel, conv2d_scalar, ConvAlgorithm};
pub use error::{ConvError, Result};
pub use grid::{Grid, Shape};
pub use init::{initialize, Workspace, DEFAULT_SEED};
