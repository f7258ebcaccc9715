//! CLI argument parsing using clap
//!
//! Numeric options are accepted as signed integers so that out-of-range
//! values (including negatives) reach the validation layer, which reports
//! them with the exit code of their category instead of a generic usage
//! error.

use clap::Parser;
use std::path::PathBuf;

/// Microbenchmark for storage devices and systems
///
/// iobench issues synchronous IO (O_SYNC and O_DIRECT) against a regular
/// file or a device file such as /dev/sdb, from one or more threads, with
/// sequential or random addressing and any read/write mix. When testing a
/// device file, all data on the device including the partition table will
/// be overwritten.
#[derive(Parser, Debug)]
#[command(name = "iobench")]
#[command(version, about)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Duration of the test for each thread, in seconds
    #[arg(short = 'd', value_name = "SECONDS")]
    pub duration: Option<i64>,

    /// Target file or device for the test
    #[arg(short = 'f', value_name = "PATH", default_value = "testfile.tmp")]
    pub filename: PathBuf,

    /// Requests per thread; the run stops at -n or -d, whichever fires first
    #[arg(short = 'n', value_name = "COUNT")]
    pub request_count: Option<i64>,

    /// Human friendly output (newline separators in config dump and summary)
    #[arg(short = 'H')]
    pub human_readable: bool,

    /// Append output to this file instead of the console
    #[arg(short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Page size in 512-byte sectors; -p 8 issues 4096-byte requests
    #[arg(short = 'p', value_name = "SECTORS", default_value_t = 8)]
    pub page_sectors: i64,

    /// Print one trace line per request
    #[arg(short = 'P')]
    pub trace: bool,

    /// Use random addresses instead of sequential
    #[arg(short = 'r')]
    pub random: bool,

    /// Ramp-up interval between thread starts, in microseconds
    #[arg(short = 'R', value_name = "MICROS")]
    pub rampup_interval: Option<i64>,

    /// Initial file offset, aligned down to 512 bytes
    #[arg(short = 's', value_name = "ADDR", default_value_t = 0)]
    pub start_offset: i64,

    /// End bound of the addressable region; sequential access wraps back to
    /// the start offset when it is reached
    #[arg(short = 'S', value_name = "ADDR", default_value_t = 16 * 1024 * 1024)]
    pub span: i64,

    /// Number of worker threads
    #[arg(short = 't', value_name = "COUNT", default_value_t = 1)]
    pub threads: i64,

    /// Percent of write requests, 0-100
    #[arg(short = 'w', value_name = "PERCENT", default_value_t = 50)]
    pub write_percent: i64,
}
