//! Coordinator
//!
//! Spawns one OS thread per configured worker, optionally staggering the
//! starts by the ramp-up interval, then blocks until every worker has
//! finished. All handles are joined on every path, including when a worker
//! fails, so no thread is ever left detached; the first failure is then
//! propagated and no report is produced for the run. There is no
//! cancellation: a run always proceeds to completion or to a fatal abort.

use crate::config::Config;
use crate::output::OutputSink;
use crate::stats::aggregator::StatisticsAggregator;
use crate::worker::Worker;
use crate::Result;
use anyhow::{anyhow, Context};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates worker threads for one benchmark run
pub struct Coordinator {
    config: Arc<Config>,
    sink: Arc<OutputSink>,
}

impl Coordinator {
    /// Create a coordinator for the given run
    pub fn new(config: Arc<Config>, sink: Arc<OutputSink>) -> Self {
        Self { config, sink }
    }

    /// Run all workers to completion and collect their statistics
    ///
    /// Returns the aggregator holding per-worker and merged statistics, or
    /// the first worker failure after every thread has been joined.
    pub fn run(&self) -> Result<StatisticsAggregator> {
        let mut handles = Vec::with_capacity(self.config.threads);

        for worker_id in 0..self.config.threads {
            let config = Arc::clone(&self.config);
            let sink = Arc::clone(&self.sink);

            let handle = std::thread::Builder::new()
                .name(format!("iobench-worker-{}", worker_id))
                .spawn(move || {
                    let mut worker = Worker::new(worker_id, config, sink);
                    worker.run()
                })
                .with_context(|| format!("failed to spawn worker thread {}", worker_id))?;
            handles.push(handle);

            if self.config.rampup_interval_us > 0 && worker_id + 1 < self.config.threads {
                std::thread::sleep(Duration::from_micros(self.config.rampup_interval_us));
            }
        }

        let mut aggregator = StatisticsAggregator::new();
        let mut first_error = None;

        for (worker_id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(stats)) => aggregator.add_worker(worker_id, stats),
                Ok(Err(err)) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
                Err(_) => {
                    if first_error.is_none() {
                        first_error = Some(anyhow!("worker thread {} panicked", worker_id));
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(aggregator),
        }
    }
}
