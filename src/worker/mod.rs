//! Worker thread implementation
//!
//! The Worker is the core execution unit. Each worker thread independently
//! opens the target, allocates one aligned page buffer, and runs the
//! request loop: next address, read-or-write decision, one blocking IO,
//! latency measurement, stats update, optional trace line. The loop exits
//! when the wall-clock deadline passes or the per-worker request budget is
//! spent, whichever comes first; the deadline is only checked between
//! requests, so a run can overshoot by at most one in-flight IO.
//!
//! # Thread Safety
//!
//! Workers share only the configuration (read-only) and the output sink
//! (internally synchronized). Target handle, buffer, address generator,
//! RNG, and statistics are exclusively owned, so the hot path takes no
//! locks. The final statistics leave the worker exactly once, as the
//! return value of [`Worker::run`].
//!
//! # Error Handling
//!
//! Any IO failure ends the run: the worker returns the error and the
//! coordinator fails the whole benchmark. A measurement that spans an
//! error is not trustworthy, so there are no retries and no partial
//! recovery.

use crate::address::{
    sequential::SequentialAddress, uniform::UniformAddress, AddressGenerator,
};
use crate::config::{AddressMode, Config};
use crate::engine::{sync::SyncEngine, IOEngine, OperationType};
use crate::output::{text, OutputSink};
use crate::stats::WorkerStats;
use crate::target::{OpenFlags, Target};
use crate::util::align::SECTOR_SIZE;
use crate::util::buffer::AlignedBuffer;
use crate::util::time::{duration_micros, epoch_seconds};
use crate::Result;
use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use std::time::Instant;

/// First byte value of the rotating write pattern ('!')
const PATTERN_LOW: u8 = 33;
/// Last byte value of the rotating write pattern ('~')
const PATTERN_HIGH: u8 = 126;

/// Worker that executes the request loop on one thread
pub struct Worker {
    /// Worker ID, used in thread names and error context
    id: usize,

    /// Shared run configuration
    config: Arc<Config>,

    /// IO engine performing the transfers
    engine: Box<dyn IOEngine>,

    /// Offset source for successive requests
    address: Box<dyn AddressGenerator>,

    /// Persistent per-worker random stream, seeded once at construction.
    /// Shared between address generation and read/write selection.
    rng: Xoshiro256PlusPlus,

    /// Statistics owned by this worker until its loop exits
    stats: WorkerStats,

    /// Destination for trace lines
    sink: Arc<OutputSink>,

    /// Current byte of the rotating printable write pattern
    fill_byte: u8,
}

impl Worker {
    /// Create a worker using the synchronous pread/pwrite engine
    pub fn new(id: usize, config: Arc<Config>, sink: Arc<OutputSink>) -> Self {
        Self::with_engine(id, config, sink, Box::new(SyncEngine::new()))
    }

    /// Create a worker with a caller-provided engine
    ///
    /// Tests use this to substitute [`crate::engine::mock::MockEngine`].
    pub fn with_engine(
        id: usize,
        config: Arc<Config>,
        sink: Arc<OutputSink>,
        engine: Box<dyn IOEngine>,
    ) -> Self {
        let address = Self::create_address_generator(&config);
        Self {
            id,
            config,
            engine,
            address,
            rng: Xoshiro256PlusPlus::from_entropy(),
            stats: WorkerStats::new(),
            sink,
            fill_byte: PATTERN_LOW,
        }
    }

    /// Build the address generator for the configured mode
    fn create_address_generator(config: &Config) -> Box<dyn AddressGenerator> {
        match config.mode {
            AddressMode::Sequential => Box::new(SequentialAddress::new(
                config.start_offset,
                config.span,
                config.page_size,
            )),
            AddressMode::Random => Box::new(UniformAddress::new(config.span)),
        }
    }

    /// Main execution loop
    ///
    /// Opens the target, runs requests until a stop condition fires, and
    /// returns the collected statistics. Any IO error aborts the run.
    pub fn run(&mut self) -> Result<WorkerStats> {
        let flags = OpenFlags {
            direct: self.config.direct,
            sync: self.config.sync,
            create: true,
        };
        let target = Target::open(&self.config.target_path, flags)
            .with_context(|| format!("worker {}: failed to open target", self.id))?;

        let mut buffer = AlignedBuffer::new(self.config.page_size as usize, SECTOR_SIZE as usize);

        let start = Instant::now();
        // A duration too large to represent as a deadline is unbounded
        let deadline = self.config.duration.and_then(|d| start.checked_add(d));
        let mut issued: u64 = 0;

        while deadline.map_or(true, |d| Instant::now() < d)
            && self.config.max_requests.map_or(true, |max| issued < max)
        {
            let offset = self.address.next_offset(&mut self.rng);
            let op_type = select_operation(&mut self.rng, self.config.write_percent);

            if op_type == OperationType::Write {
                self.fill_byte = next_pattern_byte(self.fill_byte);
                buffer.fill_byte(self.fill_byte);
            }

            let wall_clock = if self.config.trace { epoch_seconds() } else { 0 };
            let begin = Instant::now();
            let result = match op_type {
                OperationType::Read => {
                    self.engine.read_at(target.fd(), buffer.as_mut_slice(), offset)
                }
                OperationType::Write => {
                    self.engine.write_at(target.fd(), buffer.as_slice(), offset)
                }
            };
            let latency = begin.elapsed();

            result.with_context(|| {
                format!(
                    "worker {}: {} of {} bytes at offset {} failed",
                    self.id, op_type, self.config.page_size, offset
                )
            })?;

            self.stats.record_io(op_type, latency);

            if self.config.trace {
                self.sink.write_line(&text::trace_line(
                    wall_clock,
                    op_type,
                    self.config.page_size,
                    offset,
                    duration_micros(latency),
                ))?;
            }

            issued += 1;
        }

        // Buffer and target handle are released on drop; the statistics
        // move out to the coordinator for aggregation.
        Ok(std::mem::take(&mut self.stats))
    }
}

/// Decide the direction of the next request
///
/// The edge ratios are exact: 0 never writes and 100 never reads. Anything
/// in between is one uniform draw per request from the worker's persistent
/// random stream.
#[inline(always)]
pub fn select_operation(rng: &mut impl Rng, write_percent: u8) -> OperationType {
    if write_percent == 0 {
        OperationType::Read
    } else if write_percent == 100 {
        OperationType::Write
    } else if rng.gen_range(0..100u8) < write_percent {
        OperationType::Write
    } else {
        OperationType::Read
    }
}

/// Advance the write pattern to the next printable byte
#[inline(always)]
fn next_pattern_byte(current: u8) -> u8 {
    if current >= PATTERN_HIGH {
        PATTERN_LOW
    } else {
        current + 1
    }
}
