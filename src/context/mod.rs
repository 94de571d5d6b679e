//! Compute context: runs independent tasks over 1D/2D index spaces and blocks until done.
//!
//! Two backends are available:
//! - **Rayon**: a dedicated `rayon::ThreadPool`, one task per index, batched into jobs.
//! - **Sequential**: inline on the calling thread, no extra workers.
//!
//! The rayon backend splits the index space into groups of at most
//! [`ComputeContext::max_group_size`] cells per job; the sequential backend runs the
//! whole index space as one group.
//!
//! Every dispatch ends at a barrier. A panicking task is caught there and surfaced as
//! [`ConvError::Execution`]; the output buffer must then be treated as unwritten.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use clap::ValueEnum;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::{ConvError, Result};
use crate::grid::Shape;

/// Largest number of cells one rayon job handles unless overridden.
pub const DEFAULT_MAX_GROUP_SIZE: usize = 1024;

/// Selects the execution substrate behind a [`ComputeContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Work-stealing rayon thread pool.
    #[default]
    Rayon,
    /// Inline execution on the calling thread.
    Sequential,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Rayon => write!(f, "rayon"),
            Backend::Sequential => write!(f, "sequential"),
        }
    }
}

/// Identification of a compute context, printed by the drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub name: String,
    pub backend: Backend,
    /// Threads executing dispatched tasks.
    pub workers: usize,
    /// Largest batch of indices one task handles; `None` when the whole index space
    /// runs as a single inline group.
    pub max_group_size: Option<usize>,
    /// Logical CPUs reported by the host.
    pub host_parallelism: usize,
}

impl fmt::Display for ContextInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Running on {}", self.name)?;
        writeln!(f, " Backend: {}", self.backend)?;
        writeln!(f, " Workers: {}", self.workers)?;
        match self.max_group_size {
            Some(size) => writeln!(f, " Max group size: {}", size)?,
            None => writeln!(f, " Max group size: whole index space")?,
        }
        write!(f, " Host parallelism: {}", self.host_parallelism)
    }
}

pub struct ComputeContext {
    backend: Backend,
    pool: Option<ThreadPool>,
    max_group_size: usize,
}

impl ComputeContext {
    /// Builds a context for `backend`. `threads` sizes the rayon pool; `None` or `Some(0)`
    /// lets rayon pick one worker per logical CPU. Ignored for the sequential backend.
    pub fn new(backend: Backend, threads: Option<usize>) -> Result<Self> {
        match backend {
            Backend::Rayon => Self::rayon(threads),
            Backend::Sequential => Ok(Self::sequential()),
        }
    }

    pub fn sequential() -> Self {
        ComputeContext {
            backend: Backend::Sequential,
            pool: None,
            max_group_size: DEFAULT_MAX_GROUP_SIZE,
        }
    }

    pub fn rayon(threads: Option<usize>) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or(0))
            .thread_name(|i| format!("gridconv-worker-{i}"))
            .build()
            .map_err(|e| ConvError::Execution(format!("failed to build thread pool: {e}")))?;
        debug!(workers = pool.current_num_threads(), "built rayon compute context");
        Ok(ComputeContext {
            backend: Backend::Rayon,
            pool: Some(pool),
            max_group_size: DEFAULT_MAX_GROUP_SIZE,
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Caps the indices handled by one rayon job. Values below 1 are raised to 1.
    pub fn with_max_group_size(mut self, size: usize) -> Self {
        self.max_group_size = size.max(1);
        self
    }

    /// Largest batch of indices one task handles, or `None` for the sequential backend.
    pub fn max_group_size(&self) -> Option<usize> {
        self.pool.as_ref().map(|_| self.max_group_size)
    }

    pub fn workers(&self) -> usize {
        self.pool.as_ref().map_or(1, |p| p.current_num_threads())
    }

    pub fn info(&self) -> ContextInfo {
        let name = match self.backend {
            Backend::Rayon => "rayon thread pool (host CPU)".to_string(),
            Backend::Sequential => "calling thread (host CPU)".to_string(),
        };
        ContextInfo {
            name,
            backend: self.backend,
            workers: self.workers(),
            max_group_size: self.max_group_size(),
            host_parallelism: std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }

    /// Runs `task(row, col)` once per cell of `shape` and stores the value in the
    /// row-major `out`. Tasks run in no particular order and must be independent.
    /// Returns after every task has finished.
    pub fn parallel_for_2d<T, F>(&self, shape: Shape, out: &mut [T], task: F) -> Result<()>
    where
        T: Send,
        F: Fn(usize, usize) -> T + Sync,
    {
        let area = shape.validate("index space")?;
        if out.len() != area {
            return Err(ConvError::BufferSize {
                expected: area,
                actual: out.len(),
            });
        }
        let cols = shape.cols;
        debug!(rows = shape.rows, cols, workers = self.workers(), backend = %self.backend, "dispatching 2d tasks");
        self.parallel_map(out, |idx| task(idx / cols, idx % cols))
    }

    /// Runs `task(i)` once per element of `out` and stores the value at `out[i]`.
    /// Returns after every task has finished.
    pub fn parallel_map<T, F>(&self, out: &mut [T], task: F) -> Result<()>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match &self.pool {
            Some(pool) => pool.install(|| {
                out.par_iter_mut()
                    .enumerate()
                    .with_max_len(self.max_group_size)
                    .for_each(|(i, slot)| *slot = task(i));
            }),
            None => {
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = task(i);
                }
            }
        }));
        outcome.map_err(|payload| ConvError::Execution(panic_message(payload.as_ref())))
    }
}

impl fmt::Debug for ComputeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeContext")
            .field("backend", &self.backend)
            .field("workers", &self.workers())
            .field("max_group_size", &self.max_group_size())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("task panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("task panicked: {msg}")
    } else {
        "task panicked".to_string()
    }
}
