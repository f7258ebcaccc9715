//! Timing helpers
//!
//! Latencies are measured with `std::time::Instant` and reported in
//! microseconds; trace lines carry a wall-clock epoch timestamp.

use std::time::Duration;

/// Current wall-clock time as whole seconds since the Unix epoch
#[inline]
pub fn epoch_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Convert a measured duration to whole microseconds
#[inline(always)]
pub fn duration_micros(duration: Duration) -> u64 {
    duration.as_micros() as u64
}
