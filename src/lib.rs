//! iobench - microbenchmark for storage devices and systems
//!
//! iobench measures the raw IO performance of a storage target (regular file
//! or block device) by issuing synchronous, cache-bypassing read/write
//! requests from multiple concurrent worker threads.
//!
//! # Architecture
//!
//! - **Address generators**: sequential (bounded sawtooth) or uniform random offsets
//! - **Synchronous engine**: pread/pwrite with O_SYNC and O_DIRECT
//! - **Workers**: one OS thread per worker, each owning its target handle and buffer
//! - **Statistics**: per-worker counters merged into an aggregate after all joins
//! - **Reporting**: per-request trace lines, per-worker and global summaries

pub mod address;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod output;
pub mod stats;
pub mod target;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use engine::IOEngine;

/// Result type used throughout iobench
pub type Result<T> = anyhow::Result<T>;
