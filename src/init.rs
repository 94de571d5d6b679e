//! Deterministic fixtures for the convolution demo.
//!
//! Grid samples are integers in `[0, 256)` and kernel weights are `0` or `1`, drawn
//! from a `StdRng` seeded explicitly so every run with the same seed and shapes sees
//! the same data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::error::Result;
use crate::grid::{Grid, Shape};

/// Seed used by the drivers when none is given.
pub const DEFAULT_SEED: u64 = 100;

/// Exclusive upper bound of grid samples.
pub const GRID_UPPER: u32 = 256;
/// Exclusive upper bound of kernel weights.
pub const KERNEL_UPPER: u32 = 2;

/// All buffers of one convolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub grid: Grid,
    pub kernel: Grid,
    pub parallel_result: Grid,
    pub scalar_result: Grid,
}

/// Fills a grid with integral values in `[0, upper)` in row-major order.
pub fn random_grid<R: Rng>(shape: Shape, upper: u32, rng: &mut R) -> Result<Grid> {
    Grid::from_fn(shape.rows, shape.cols, |_, _| rng.gen_range(0..upper) as f32)
}

/// Allocates and seeds the grid and kernel, and zeroes both result grids.
///
/// The grid is drawn before the kernel from a single generator. Fails with
/// [`ConvError::InvalidShape`](crate::ConvError::InvalidShape) if either shape has
/// a zero dimension.
pub fn initialize(grid_shape: Shape, window: Shape, seed: u64) -> Result<Workspace> {
    grid_shape.validate("grid")?;
    window.validate("window")?;
    info!(grid = %grid_shape, window = %window, seed, "initializing");

    let mut rng = StdRng::seed_from_u64(seed);
    let grid = random_grid(grid_shape, GRID_UPPER, &mut rng)?;
    let kernel = random_grid(window, KERNEL_UPPER, &mut rng)?;

    Ok(Workspace {
        grid,
        kernel,
        parallel_result: Grid::zeros(grid_shape.rows, grid_shape.cols)?,
        scalar_result: Grid::zeros(grid_shape.rows, grid_shape.cols)?,
    })
}
