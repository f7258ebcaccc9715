//! Synchronous IO engine
//!
//! Uses blocking pread/pwrite syscalls for positioned IO without moving the
//! file offset, so concurrent workers can share one target path with no
//! coordination. Partial transfers are retried until the full amount moves
//! or an error occurs.
//!
//! With the target opened O_SYNC and O_DIRECT (see [`crate::target`]), each
//! call measures the underlying medium rather than the page cache.

use super::IOEngine;
use crate::Result;
use anyhow::Context;
use std::os::unix::io::RawFd;

/// Synchronous IO engine using pread/pwrite
pub struct SyncEngine;

impl SyncEngine {
    /// Create a new synchronous IO engine
    pub fn new() -> Self {
        Self
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IOEngine for SyncEngine {
    fn read_at(&mut self, fd: RawFd, buffer: &mut [u8], offset: u64) -> Result<usize> {
        let length = buffer.len();
        let mut total_read = 0;
        let mut current_offset = offset;

        while total_read < length {
            let remaining = length - total_read;
            // SAFETY: the slice guarantees `remaining` valid bytes past `total_read`.
            let result = unsafe {
                libc::pread(
                    fd,
                    buffer.as_mut_ptr().add(total_read) as *mut libc::c_void,
                    remaining,
                    current_offset as libc::off_t,
                )
            };

            if result < 0 {
                let err = std::io::Error::last_os_error();
                return Err(err).context(format!(
                    "pread failed: fd={}, offset={}, length={}",
                    fd, current_offset, remaining
                ));
            }

            if result == 0 {
                // EOF; the benchmark may address past the end of a short file
                break;
            }

            let bytes_read = result as usize;
            total_read += bytes_read;
            current_offset += bytes_read as u64;
        }

        Ok(total_read)
    }

    fn write_at(&mut self, fd: RawFd, buffer: &[u8], offset: u64) -> Result<usize> {
        let length = buffer.len();
        let mut total_written = 0;
        let mut current_offset = offset;

        while total_written < length {
            let remaining = length - total_written;
            // SAFETY: the slice guarantees `remaining` valid bytes past `total_written`.
            let result = unsafe {
                libc::pwrite(
                    fd,
                    buffer.as_ptr().add(total_written) as *const libc::c_void,
                    remaining,
                    current_offset as libc::off_t,
                )
            };

            if result < 0 {
                let err = std::io::Error::last_os_error();
                return Err(err).context(format!(
                    "pwrite failed: fd={}, offset={}, length={}",
                    fd, current_offset, remaining
                ));
            }

            let bytes_written = result as usize;
            total_written += bytes_written;
            current_offset += bytes_written as u64;
        }

        Ok(total_written)
    }
}
