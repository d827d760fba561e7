//! Parallel batch execution.
//!
//! Every file of a batch runs its own independent pipeline ([`crate::pipeline::process_file`]),
//! so files can be processed on a thread pool without coordination. This module provides:
//!
//! - A dedicated `rayon` pool for batch runs
//! - A throttle on how many files are processed at once
//! - Real-time metrics + observer hooks for monitoring
//!
//! Outcomes come back in input order, and a failed file never affects the others.

mod observer;
mod semaphore;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::pipeline::{process_file, FileInput, FileOutcome, SweepRequest};

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`BatchExecutor`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Upper bound on files processed concurrently, on top of `num_threads`.
    ///
    /// Each in-flight file holds its input, its table and its output in memory.
    pub max_in_flight_files: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
            max_in_flight_files: n.max(1),
        }
    }
}

/// Runs per-file pipelines for a batch in parallel.
pub struct BatchExecutor {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl BatchExecutor {
    /// Create a new executor with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `max_in_flight_files == 0` or `num_threads == Some(0)`.
    pub fn new(opts: ExecutionOptions) -> Result<Self, ThreadPoolBuildError> {
        assert!(
            opts.max_in_flight_files > 0,
            "max_in_flight_files must be > 0"
        );
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Process every input with `request`, in parallel.
    ///
    /// Returns one [`FileOutcome`] per input, in input order.
    pub fn run(&self, inputs: &[FileInput], request: &SweepRequest) -> Vec<FileOutcome> {
        self.pool.install(|| self.run_impl(inputs, request))
    }

    fn run_impl(&self, inputs: &[FileInput], request: &SweepRequest) -> Vec<FileOutcome> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted { files: inputs.len() });

        let sem = Semaphore::new(self.opts.max_in_flight_files);

        let outcomes: Vec<FileOutcome> = inputs
            .par_iter()
            .map(|input| {
                let waited = sem.acquire();
                if waited > Duration::ZERO {
                    self.metrics.on_throttle_wait(waited);
                    self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                }

                self.metrics.on_file_start();
                self.emit(ExecutionEvent::FileStarted {
                    name: input.name.clone(),
                });

                let result = process_file(input, request);
                let rows_out = result.as_ref().map(|p| p.stats.rows_out).unwrap_or(0);

                self.emit(ExecutionEvent::FileFinished {
                    name: input.name.clone(),
                    ok: result.is_ok(),
                    rows_out,
                });
                self.metrics.on_file_end(result.is_ok(), rows_out);
                sem.release();

                FileOutcome {
                    name: input.name.clone(),
                    result,
                }
            })
            .collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        outcomes
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
