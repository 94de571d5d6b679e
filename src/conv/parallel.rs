//! Output-stationary parallel convolution.
//!
//! Each output cell is an independent task dispatched through a [`ComputeContext`];
//! tasks only read the grid and kernel and write their own cell.

use crate::context::ComputeContext;
use crate::error::Result;
use crate::grid::Grid;

use super::check_operands;

/// Windowed reduction for the single output cell `(row, col)`.
///
/// Accumulates in ascending window-row then window-column order, matching
/// [`conv2d_scalar`](super::conv2d_scalar) so both paths agree bit for bit.
#[inline]
fn cell_response(grid: &Grid, kernel: &Grid, row: usize, col: usize) -> f32 {
    let (n_cols, slide_rows, slide_cols) = (grid.cols(), kernel.rows(), kernel.cols());
    let (input, weights) = (grid.as_slice(), kernel.as_slice());
    let rows_in = slide_rows.min(grid.rows() - row);
    let cols_in = slide_cols.min(n_cols - col);
    let mut sum = 0.0f32;
    for wi in 0..rows_in {
        let in_off = (row + wi) * n_cols + col;
        let w_off = wi * slide_cols;
        for wj in 0..cols_in {
            sum += input[in_off + wj] * weights[w_off + wj];
        }
    }
    sum / (slide_rows * slide_cols) as f32
}

/// Parallel convolution with the same edge-clipped, full-area-normalized window as
/// [`conv2d_scalar`](super::conv2d_scalar).
pub fn conv2d_parallel(ctx: &ComputeContext, grid: &Grid, kernel: &Grid) -> Result<Grid> {
    let mut out = Grid::zeros(grid.rows(), grid.cols())?;
    conv2d_parallel_into(ctx, grid, kernel, &mut out)?;
    Ok(out)
}

/// Same as [`conv2d_parallel`], writing every cell of the caller's `out`.
///
/// On error the contents of `out` are unspecified.
pub fn conv2d_parallel_into(
    ctx: &ComputeContext,
    grid: &Grid,
    kernel: &Grid,
    out: &mut Grid,
) -> Result<()> {
    check_operands(grid, kernel, out)?;
    ctx.parallel_for_2d(grid.shape(), out.as_mut_slice(), |row, col| {
        cell_response(grid, kernel, row, col)
    })
}
