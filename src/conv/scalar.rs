use crate::error::Result;
use crate::grid::Grid;

use super::check_operands;

/// Scalar nested-loop convolution (reference implementation).
///
/// The window is anchored at its top-left corner on the output cell and extends
/// down and right. Terms falling outside the grid are skipped, yet the sum is still
/// divided by the full window area, so the last `slide_rows - 1` rows and
/// `slide_cols - 1` columns come out under-normalized. This quirk is intentional.
pub fn conv2d_scalar(grid: &Grid, kernel: &Grid) -> Result<Grid> {
    let mut out = Grid::zeros(grid.rows(), grid.cols())?;
    conv2d_scalar_into(grid, kernel, &mut out)?;
    Ok(out)
}

/// Same as [`conv2d_scalar`], writing every cell of the caller's `out`.
pub fn conv2d_scalar_into(grid: &Grid, kernel: &Grid, out: &mut Grid) -> Result<()> {
    check_operands(grid, kernel, out)?;

    let (n_rows, n_cols) = (grid.rows(), grid.cols());
    let (slide_rows, slide_cols) = (kernel.rows(), kernel.cols());
    let input = grid.as_slice();
    let weights = kernel.as_slice();
    let area = (slide_rows * slide_cols) as f32;
    let output = out.as_mut_slice();

    for i in 0..n_rows {
        for j in 0..n_cols {
            let mut sum = 0.0f32;
            for wi in 0..slide_rows {
                if wi + i >= n_rows {
                    break;
                }
                for wj in 0..slide_cols {
                    if wj + j >= n_cols {
                        break;
                    }
                    sum += input[(wi + i) * n_cols + wj + j] * weights[wi * slide_cols + wj];
                }
            }
            output[i * n_cols + j] = sum / area;
        }
    }
    Ok(())
}
