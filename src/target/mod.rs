//! Target abstraction
//!
//! A target is the file or block device under test. Every worker opens the
//! target independently and keeps its own descriptor, so there is no shared
//! handle state between threads; the benchmark contract is that the path
//! tolerates concurrent open and positioned IO, which holds for both regular
//! files and device files.
//!
//! The handle is closed when the [`Target`] drops, at worker exit.

use crate::Result;
use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

/// Flags controlling how the target is opened
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenFlags {
    /// Use direct IO (O_DIRECT) - bypass the page cache
    pub direct: bool,

    /// Use synchronous IO (O_SYNC) - writes reach the medium before returning
    pub sync: bool,

    /// Create the target if it doesn't exist (regular files only; device
    /// files always exist)
    pub create: bool,
}

/// An open file or block device receiving the benchmark IO
pub struct Target {
    file: File,
}

impl Target {
    /// Open the target for read-write positioned IO
    ///
    /// Cache-bypassing flags are applied via `custom_flags`; some
    /// filesystems (tmpfs among them) reject O_DIRECT, which surfaces here
    /// as a resource error before any request is issued.
    pub fn open(path: &Path, flags: OpenFlags) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);

        if flags.create {
            options.create(true);
        }

        let mut custom_flags = 0;
        if flags.direct {
            custom_flags |= libc::O_DIRECT;
        }
        if flags.sync {
            custom_flags |= libc::O_SYNC;
        }
        if custom_flags != 0 {
            options.custom_flags(custom_flags);
        }

        let file = options
            .open(path)
            .with_context(|| format!("Failed to open target: {}", path.display()))?;

        Ok(Self { file })
    }

    /// File descriptor for the IO engine
    #[inline(always)]
    pub fn fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }

    /// Current size of the target in bytes
    pub fn size(&self) -> Result<u64> {
        let metadata = self.file.metadata().context("Failed to stat target")?;
        Ok(metadata.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("target.dat");

        let flags = OpenFlags {
            create: true,
            ..OpenFlags::default()
        };
        let target = Target::open(&path, flags).unwrap();

        assert!(path.exists());
        assert!(target.fd() >= 0);
        assert_eq!(target.size().unwrap(), 0);
    }

    #[test]
    fn test_open_existing_file_reports_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("target.dat");
        std::fs::write(&path, vec![0u8; 8192]).unwrap();

        let target = Target::open(&path, OpenFlags::default()).unwrap();
        assert_eq!(target.size().unwrap(), 8192);
    }

    #[test]
    fn test_open_without_create_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.dat");

        assert!(Target::open(&path, OpenFlags::default()).is_err());
    }

    #[test]
    fn test_concurrent_opens_of_one_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shared.dat");

        let flags = OpenFlags {
            create: true,
            ..OpenFlags::default()
        };
        let a = Target::open(&path, flags).unwrap();
        let b = Target::open(&path, flags).unwrap();
        assert_ne!(a.fd(), b.fd());
    }

    #[test]
    fn test_handle_closes_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("target.dat");

        let flags = OpenFlags {
            create: true,
            ..OpenFlags::default()
        };
        let target = Target::open(&path, flags).unwrap();
        let fd = target.fd();
        drop(target);

        // A positioned read on the closed descriptor must fail with EBADF
        let mut byte = 0u8;
        let result = unsafe { libc::pread(fd, &mut byte as *mut u8 as *mut libc::c_void, 1, 0) };
        assert_eq!(result, -1);
    }
}
