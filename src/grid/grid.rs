use std::fmt;

use crate::error::{ConvError, Result};

/// Dimensions of a row-major 2D array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Number of cells, or `None` if it overflows `usize`.
    pub fn checked_area(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Rejects zero dimensions and overflowing areas. `what` names the array in the error.
    pub fn validate(&self, what: &'static str) -> Result<usize> {
        match self.checked_area() {
            Some(area) if self.rows > 0 && self.cols > 0 => Ok(area),
            _ => Err(ConvError::InvalidShape {
                what,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A 2D `f32` array stored row-major in a flat, exclusively owned buffer.
///
/// Used for the input grid, the kernel (sliding window) and each result grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    shape: Shape,
    data: Vec<f32>,
}

impl Grid {
    /// Zero-filled grid. Fails on zero dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let area = shape.validate("grid")?;
        Ok(Grid {
            shape,
            data: vec![0.0; area],
        })
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let area = shape.validate("grid")?;
        if data.len() != area {
            return Err(ConvError::BufferSize {
                expected: area,
                actual: data.len(),
            });
        }
        Ok(Grid { shape, data })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell in row-major order.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f32,
    {
        let shape = Shape::new(rows, cols);
        let area = shape.validate("grid")?;
        let mut data = Vec::with_capacity(area);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Ok(Grid { shape, data })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    pub fn fill(&mut self, val: f32) {
        self.data.fill(val);
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.shape.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, val: f32) {
        let idx = row * self.shape.cols + col;
        self.data[idx] = val;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.shape.cols;
        &self.data[start..start + self.shape.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks(self.shape.cols)
    }
}

/// One row per line, every value followed by `", "`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for val in row {
                write!(f, "{}, ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
