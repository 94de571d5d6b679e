//! Weighted moments and least-squares regression.
//!
//! Elementwise products are offloaded to a [`ComputeContext`] with one task per
//! sample; the sums are reduced on the calling thread in index order.

use std::fmt;

use thiserror::Error;

use crate::context::ComputeContext;
use crate::error::ConvError;

pub type StatsResult<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("no samples")]
    Empty,

    #[error("length mismatch: {name} has {actual} samples, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// All `x` samples are equal, so the regression line is undefined.
    #[error("regression is undefined: x has zero spread")]
    DegenerateRegression,

    #[error(transparent)]
    Execution(#[from] ConvError),
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient; not finite when `y` has zero spread.
    pub r: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Moments of two weighted variables and the regression of `y` on `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub x_mean: f64,
    pub x_var: f64,
    pub y_mean: f64,
    pub y_var: f64,
    pub cov_xy: f64,
    pub regression: Regression,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "x_mean: {}", self.x_mean)?;
        writeln!(f, "x_var: {}", self.x_var)?;
        writeln!(f, "y_mean: {}", self.y_mean)?;
        writeln!(f, "y_var: {}", self.y_var)?;
        writeln!(f, "cov_xy: {}", self.cov_xy)?;
        writeln!(f, "regression y = a*x + b")?;
        writeln!(f, "  a: {}", self.regression.slope)?;
        writeln!(f, "  b: {}", self.regression.intercept)?;
        write!(f, "  r: {}", self.regression.r)
    }
}

fn check_len(name: &'static str, values: &[f64], expected: usize) -> StatsResult<()> {
    if values.len() != expected {
        return Err(StatsError::LengthMismatch {
            name,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

fn check_pair(x: &[f64], other_name: &'static str, other: &[f64]) -> StatsResult<usize> {
    if x.is_empty() {
        return Err(StatsError::Empty);
    }
    check_len(other_name, other, x.len())?;
    Ok(x.len())
}

/// `Σ x[i] * prob[i]`.
pub fn weighted_mean(ctx: &ComputeContext, x: &[f64], prob: &[f64]) -> StatsResult<f64> {
    let n = check_pair(x, "prob", prob)?;
    let mut terms = vec![0.0f64; n];
    ctx.parallel_map(&mut terms, |i| x[i] * prob[i])?;
    Ok(terms.iter().sum())
}

/// `Σ x[i]² * prob[i] - mean²`, with both sums gathered in one dispatch.
pub fn weighted_variance(ctx: &ComputeContext, x: &[f64], prob: &[f64]) -> StatsResult<f64> {
    let (mean, second) = first_two_moments(ctx, x, prob)?;
    Ok(second - mean * mean)
}

fn first_two_moments(ctx: &ComputeContext, x: &[f64], prob: &[f64]) -> StatsResult<(f64, f64)> {
    let n = check_pair(x, "prob", prob)?;
    let mut terms = vec![(0.0f64, 0.0f64); n];
    ctx.parallel_map(&mut terms, |i| (x[i] * prob[i], x[i] * x[i] * prob[i]))?;
    Ok(terms
        .iter()
        .fold((0.0, 0.0), |(m, s), &(tm, ts)| (m + tm, s + ts)))
}

/// `Σ x[i] * y[i] * prob[i] - mean_x * mean_y` under the joint weights `prob`.
pub fn weighted_covariance(
    ctx: &ComputeContext,
    x: &[f64],
    y: &[f64],
    prob: &[f64],
) -> StatsResult<f64> {
    let n = check_pair(x, "y", y)?;
    check_len("prob", prob, n)?;
    let mut terms = vec![0.0f64; n];
    ctx.parallel_map(&mut terms, |i| x[i] * y[i] * prob[i])?;
    let mean_xy: f64 = terms.iter().sum();
    Ok(mean_xy - weighted_mean(ctx, x, prob)? * weighted_mean(ctx, y, prob)?)
}

/// Unweighted least-squares fit of `y` on `x`.
pub fn linear_regression(ctx: &ComputeContext, x: &[f64], y: &[f64]) -> StatsResult<Regression> {
    let n = check_pair(x, "y", y)?;
    let mut terms = vec![[0.0f64; 3]; n];
    ctx.parallel_map(&mut terms, |i| [x[i] * y[i], x[i] * x[i], y[i] * y[i]])?;

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx, mut sum_yy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for i in 0..n {
        sum_x += x[i];
        sum_y += y[i];
        sum_xy += terms[i][0];
        sum_xx += terms[i][1];
        sum_yy += terms[i][2];
    }

    let nf = n as f64;
    let denom = nf * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return Err(StatsError::DegenerateRegression);
    }
    let numer = nf * sum_xy - sum_x * sum_y;
    let slope = numer / denom;
    let intercept = (sum_y * sum_xx - sum_x * sum_xy) / denom;
    let r = numer / (denom * (nf * sum_yy - sum_y * sum_y)).sqrt();

    Ok(Regression {
        slope,
        intercept,
        r,
    })
}

/// Moments of `x` under `x_prob` and of `y` under `y_prob`, their covariance, and the
/// regression of `y` on `x`.
///
/// The mixed moment `Σ x[i] * y[i] * y_prob[i]` is weighted by `y_prob`, so `cov_xy`
/// matches [`weighted_covariance`] only when both weight vectors are equal.
pub fn summarize(
    ctx: &ComputeContext,
    x: &[f64],
    y: &[f64],
    x_prob: &[f64],
    y_prob: &[f64],
) -> StatsResult<Summary> {
    let n = check_pair(x, "y", y)?;
    check_len("x_prob", x_prob, n)?;
    check_len("y_prob", y_prob, n)?;

    let (x_mean, x_second) = first_two_moments(ctx, x, x_prob)?;
    let (y_mean, y_second) = first_two_moments(ctx, y, y_prob)?;

    let mut terms = vec![0.0f64; n];
    ctx.parallel_map(&mut terms, |i| x[i] * y[i] * y_prob[i])?;
    let mean_xy: f64 = terms.iter().sum();

    Ok(Summary {
        x_mean,
        x_var: x_second - x_mean * x_mean,
        y_mean,
        y_var: y_second - y_mean * y_mean,
        cov_xy: mean_xy - x_mean * y_mean,
        regression: linear_regression(ctx, x, y)?,
    })
}
