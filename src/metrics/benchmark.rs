use std::fmt;
use std::time::{Duration, Instant};

use crate::context::ContextInfo;
use crate::error::{ConvError, Result};
use crate::grid::{Grid, Shape};

/// Wall-clock interval started at construction.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Runs `f` and returns its output together with the time it took.
pub fn timed<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let watch = Stopwatch::start();
    let out = f();
    (out, watch.elapsed())
}

/// Cell-by-cell agreement between two result grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub cells: usize,
    /// Cells whose values are not bit-identical.
    pub mismatched: usize,
    pub max_abs_diff: f32,
    pub mse: f64,
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        self.mismatched == 0
    }

    pub fn within(&self, tol: f32) -> bool {
        self.max_abs_diff <= tol
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identical() {
            write!(f, "results identical ({} cells)", self.cells)
        } else {
            write!(
                f,
                "results differ in {}/{} cells (max abs diff {:e}, mse {:e})",
                self.mismatched, self.cells, self.max_abs_diff, self.mse
            )
        }
    }
}

/// Compares two grids of the same shape.
pub fn compare_grids(a: &Grid, b: &Grid) -> Result<Comparison> {
    if a.shape() != b.shape() {
        return Err(ConvError::BufferSize {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let mut mismatched = 0usize;
    let mut max_abs_diff = 0.0f32;
    let mut sum = 0.0f64;
    for (va, vb) in a.as_slice().iter().zip(b.as_slice()) {
        if va.to_bits() != vb.to_bits() {
            mismatched += 1;
        }
        let diff = (va - vb).abs();
        max_abs_diff = max_abs_diff.max(diff);
        sum += (diff as f64) * (diff as f64);
    }
    let cells = a.len();
    Ok(Comparison {
        cells,
        mismatched,
        max_abs_diff,
        mse: if cells == 0 { 0.0 } else { sum / cells as f64 },
    })
}

/// Everything the convolution driver reports for one run.
pub struct RunReport {
    pub context: ContextInfo,
    pub grid: Shape,
    pub window: Shape,
    pub parallel_time: Duration,
    pub scalar_time: Duration,
    pub comparison: Comparison,
}

impl RunReport {
    /// Scalar time over parallel time, or `0.0` when the parallel phase was too short to measure.
    pub fn speedup(&self) -> f64 {
        let par = self.parallel_time.as_secs_f64();
        if par > 1e-9 {
            self.scalar_time.as_secs_f64() / par
        } else {
            0.0
        }
    }
}

/// Lead-in line followed by the context identification, printed before the offload phase.
pub fn context_header(context: &ContextInfo) -> String {
    format!("Computing convolution on device ...\n{}", context)
}

/// Print the timing and comparison summary to stdout.
pub fn print_report(report: &RunReport) {
    let par_ms = report.parallel_time.as_micros() as f64 / 1000.0;
    let scalar_ms = report.scalar_time.as_micros() as f64 / 1000.0;

    println!("\n=== Summary ===");
    println!(
        "Grid {} / window {} on {} ({} workers)",
        report.grid, report.window, report.context.backend, report.context.workers
    );
    println!(
        "{:<10} {:>10.3}ms\n{:<10} {:>10.3}ms    Speedup: {:.2}x",
        "Parallel", par_ms, "Scalar", scalar_ms, report.speedup()
    );
    println!("{}", report.comparison);
}
