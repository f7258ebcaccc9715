//! IO engine abstraction
//!
//! The engine performs the actual data transfer for one request. The worker
//! loop is agnostic to the transfer mechanism: the production engine issues
//! blocking positioned syscalls ([`sync::SyncEngine`]), while tests can
//! substitute an in-memory engine ([`mock::MockEngine`]) to exercise the
//! request loop without touching storage.
//!
//! # Error Handling
//!
//! Any engine error invalidates the benchmark: the worker aborts its run
//! and the coordinator fails the whole process. Engines therefore report
//! errors with full context (fd, offset, length) and never retry beyond
//! completing a partial transfer.

use crate::Result;
use std::os::unix::io::RawFd;

/// Direction of a single IO request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// Read one page from the target into the buffer
    Read,
    /// Write one page from the buffer to the target
    Write,
}

impl OperationType {
    /// Single-letter tag used in trace lines
    pub fn tag(&self) -> &'static str {
        match self {
            OperationType::Read => "r",
            OperationType::Write => "w",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Read => write!(f, "read"),
            OperationType::Write => write!(f, "write"),
        }
    }
}

/// IO engine trait
///
/// Each worker owns its own engine instance, so implementations must be
/// `Send` but not `Sync`. Both methods block until the transfer completes
/// and return the number of bytes moved.
pub trait IOEngine: Send {
    /// Read `buffer.len()` bytes from `fd` at `offset`
    ///
    /// May return fewer bytes than requested when the read crosses end of
    /// file; that is not an error for a benchmark target.
    fn read_at(&mut self, fd: RawFd, buffer: &mut [u8], offset: u64) -> Result<usize>;

    /// Write `buffer.len()` bytes to `fd` at `offset`
    fn write_at(&mut self, fd: RawFd, buffer: &[u8], offset: u64) -> Result<usize>;
}

pub mod mock;
pub mod sync;
