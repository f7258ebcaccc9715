//! Report output
//!
//! All run output - the config dump, per-request trace lines, and the
//! final summaries - goes through one [`OutputSink`]: the console by
//! default, or a file opened in append mode with `-o`. The sink serializes
//! whole lines under a mutex so trace lines from concurrent workers never
//! interleave mid-line.

pub mod text;

use crate::Result;
use anyhow::Context;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Line-oriented output destination shared by all workers
pub struct OutputSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl OutputSink {
    /// Sink writing to standard output
    pub fn console() -> Self {
        Self {
            writer: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Sink appending to a file, creating it and its parent directories
    /// as needed
    pub fn append_file(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;

        Ok(Self {
            writer: Mutex::new(Box::new(file)),
        })
    }

    /// Write one line and flush it
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(writer, "{}", line).context("Failed to write output line")?;
        writer.flush().context("Failed to flush output")?;
        Ok(())
    }
}
