//! Statistics aggregation
//!
//! Collects the final statistics of every worker after the coordinator has
//! joined it and merges them into a single aggregate view. Because each
//! worker's record arrives exactly once and merging is plain addition, the
//! aggregate is independent of completion order and no updates can be lost.

use crate::stats::WorkerStats;
use std::collections::HashMap;

/// Aggregator of per-worker statistics
///
/// # Usage
///
/// 1. Create with `new()`
/// 2. Add each worker's final statistics with `add_worker()`
/// 3. Read the merged view with `aggregate()`
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    /// Per-worker statistics (worker_id → stats)
    workers: HashMap<usize, WorkerStats>,

    /// Cached aggregate, recomputed when a worker is added
    aggregate_cache: Option<WorkerStats>,
}

impl StatisticsAggregator {
    /// Create a new empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the final statistics of one worker
    pub fn add_worker(&mut self, worker_id: usize, stats: WorkerStats) {
        self.workers.insert(worker_id, stats);
        self.aggregate_cache = None;
    }

    /// Number of workers added so far
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Merged statistics across all added workers
    pub fn aggregate(&mut self) -> &WorkerStats {
        if self.aggregate_cache.is_none() {
            let mut aggregate = WorkerStats::new();
            for stats in self.workers.values() {
                aggregate.merge(stats);
            }
            self.aggregate_cache = Some(aggregate);
        }
        self.aggregate_cache.as_ref().unwrap()
    }

    /// Statistics of a specific worker
    pub fn worker_stats(&self, worker_id: usize) -> Option<&WorkerStats> {
        self.workers.get(&worker_id)
    }

    /// Worker IDs in ascending order, for stable report output
    pub fn worker_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.workers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OperationType;
    use std::time::Duration;

    fn stats_with(reads: u64, writes: u64) -> WorkerStats {
        let mut stats = WorkerStats::new();
        for _ in 0..reads {
            stats.record_io(OperationType::Read, Duration::from_micros(100));
        }
        for _ in 0..writes {
            stats.record_io(OperationType::Write, Duration::from_micros(200));
        }
        stats
    }

    #[test]
    fn test_aggregate_empty() {
        let mut aggregator = StatisticsAggregator::new();
        assert_eq!(aggregator.num_workers(), 0);
        assert_eq!(aggregator.aggregate().total_ops(), 0);
    }

    #[test]
    fn test_aggregate_multiple_workers() {
        let mut aggregator = StatisticsAggregator::new();
        aggregator.add_worker(0, stats_with(3, 1));
        aggregator.add_worker(1, stats_with(2, 4));

        let aggregate = aggregator.aggregate();
        assert_eq!(aggregate.read_ops(), 5);
        assert_eq!(aggregate.write_ops(), 5);
        assert_eq!(aggregate.total_ops(), 10);
        assert_eq!(aggregate.read_time_us(), 500);
        assert_eq!(aggregate.write_time_us(), 1000);
    }

    #[test]
    fn test_aggregate_invariants_hold() {
        let mut aggregator = StatisticsAggregator::new();
        for id in 0..8 {
            aggregator.add_worker(id, stats_with(id as u64, 8 - id as u64));
        }

        let aggregate = aggregator.aggregate();
        assert_eq!(
            aggregate.total_ops(),
            aggregate.read_ops() + aggregate.write_ops()
        );
        assert_eq!(
            aggregate.total_time_us(),
            aggregate.read_time_us() + aggregate.write_time_us()
        );
    }

    #[test]
    fn test_cache_invalidation_on_add() {
        let mut aggregator = StatisticsAggregator::new();
        aggregator.add_worker(0, stats_with(1, 0));
        assert_eq!(aggregator.aggregate().total_ops(), 1);

        aggregator.add_worker(1, stats_with(1, 1));
        assert_eq!(aggregator.aggregate().total_ops(), 3);
    }

    #[test]
    fn test_worker_ids_sorted() {
        let mut aggregator = StatisticsAggregator::new();
        aggregator.add_worker(2, stats_with(0, 0));
        aggregator.add_worker(0, stats_with(0, 0));
        aggregator.add_worker(1, stats_with(0, 0));

        assert_eq!(aggregator.worker_ids(), vec![0, 1, 2]);
        assert!(aggregator.worker_stats(1).is_some());
        assert!(aggregator.worker_stats(9).is_none());
    }
}
