//! Command-line arguments and run configuration for the drivers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::context::{Backend, ComputeContext};
use crate::error::Result;
use crate::grid::Shape;
use crate::init::DEFAULT_SEED;

/// Edge-clipped 2D sliding-window convolution, parallel vs scalar
#[derive(Parser, Debug, Clone)]
#[command(name = "gridconv")]
#[command(author, version, about, long_about = None)]
pub struct ConvArgs {
    /// Number of grid rows (size of dim0)
    pub row_size: usize,

    /// Number of grid columns (size of dim1)
    pub col_size: usize,

    /// Rows of the sliding window
    pub slide_size_row: usize,

    /// Columns of the sliding window
    pub slide_size_col: usize,

    /// Seed for the grid and kernel generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Execution backend for the parallel phase
    #[arg(short, long, value_enum, default_value_t = Backend::Rayon)]
    pub backend: Backend,

    /// Worker threads for the rayon backend (default: one per logical CPU)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Skip printing the result grids
    #[arg(long)]
    pub no_print: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Validated settings for one convolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub grid: Shape,
    pub window: Shape,
    pub seed: u64,
    pub backend: Backend,
    pub threads: Option<usize>,
}

impl RunConfig {
    pub fn context(&self) -> Result<ComputeContext> {
        ComputeContext::new(self.backend, self.threads)
    }
}

impl ConvArgs {
    /// Checks the grid and window shapes before anything is allocated.
    pub fn to_config(&self) -> Result<RunConfig> {
        let grid = Shape::new(self.row_size, self.col_size);
        let window = Shape::new(self.slide_size_row, self.slide_size_col);
        grid.validate("grid")?;
        window.validate("window")?;
        Ok(RunConfig {
            grid,
            window,
            seed: self.seed,
            backend: self.backend,
            threads: self.threads,
        })
    }
}

/// Weighted statistics and linear regression of y on x
#[derive(Parser, Debug, Clone)]
#[command(name = "regression")]
#[command(author, version, about, long_about = None)]
pub struct RegressionArgs {
    /// Comma-separated x samples
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [43.0, 21.0, 25.0, 42.0, 57.0, 59.0])]
    pub x: Vec<f64>,

    /// Comma-separated y samples
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [99.0, 65.0, 79.0, 75.0, 87.0, 81.0])]
    pub y: Vec<f64>,

    /// Comma-separated probabilities weighting the x samples
    #[arg(long, value_delimiter = ',', default_values_t = [0.1, 0.1, 0.1, 0.1, 0.1, 0.5])]
    pub x_prob: Vec<f64>,

    /// Comma-separated probabilities weighting the y samples and the x*y products
    #[arg(long, value_delimiter = ',', default_values_t = [0.1, 0.1, 0.1, 0.1, 0.1, 0.5])]
    pub y_prob: Vec<f64>,

    /// Execution backend for the elementwise products
    #[arg(short, long, value_enum, default_value_t = Backend::Rayon)]
    pub backend: Backend,

    /// Worker threads for the rayon backend
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Installs a stderr `tracing` subscriber. `RUST_LOG` takes precedence over the flags.
pub fn setup_logging(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
