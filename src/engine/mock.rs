//! Mock IO engine for tests
//!
//! Records every request without touching storage and can inject a failure
//! at a chosen request index, which lets tests assert on the fail-fast
//! behavior of the worker loop without terminating the test process.

use super::{IOEngine, OperationType};
use crate::Result;
use std::os::unix::io::RawFd;

/// One request as seen by the mock engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedOp {
    pub op_type: OperationType,
    pub offset: u64,
    pub length: usize,
}

/// In-memory engine recording submitted operations
pub struct MockEngine {
    /// All requests in submission order
    pub ops: Vec<RecordedOp>,
    /// Fail the request with this zero-based index, if set
    fail_at: Option<usize>,
}

impl MockEngine {
    /// Create a mock engine that completes every request
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            fail_at: None,
        }
    }

    /// Create a mock engine that fails the `index`-th request
    pub fn failing_at(index: usize) -> Self {
        Self {
            ops: Vec::new(),
            fail_at: Some(index),
        }
    }

    fn record(&mut self, op_type: OperationType, offset: u64, length: usize) -> Result<usize> {
        if self.fail_at == Some(self.ops.len()) {
            let err = std::io::Error::from_raw_os_error(libc::EIO);
            return Err(anyhow::Error::new(err)
                .context(format!("injected {} failure at offset {}", op_type, offset)));
        }
        self.ops.push(RecordedOp {
            op_type,
            offset,
            length,
        });
        Ok(length)
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IOEngine for MockEngine {
    fn read_at(&mut self, _fd: RawFd, buffer: &mut [u8], offset: u64) -> Result<usize> {
        self.record(OperationType::Read, offset, buffer.len())
    }

    fn write_at(&mut self, _fd: RawFd, buffer: &[u8], offset: u64) -> Result<usize> {
        self.record(OperationType::Write, offset, buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_operations() {
        let mut engine = MockEngine::new();
        let mut buf = [0u8; 4096];

        engine.read_at(3, &mut buf, 0).unwrap();
        engine.write_at(3, &buf, 4096).unwrap();

        assert_eq!(engine.ops.len(), 2);
        assert_eq!(engine.ops[0].op_type, OperationType::Read);
        assert_eq!(engine.ops[1].op_type, OperationType::Write);
        assert_eq!(engine.ops[1].offset, 4096);
        assert_eq!(engine.ops[1].length, 4096);
    }

    #[test]
    fn test_mock_injected_failure() {
        let mut engine = MockEngine::failing_at(1);
        let mut buf = [0u8; 512];

        assert!(engine.read_at(3, &mut buf, 0).is_ok());
        let err = engine.read_at(3, &mut buf, 512).unwrap_err();
        // The injected error carries EIO so callers can surface an OS code
        let io_err = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<std::io::Error>())
            .expect("io::Error in chain");
        assert_eq!(io_err.raw_os_error(), Some(libc::EIO));
    }
}
