//! Sequential address generation
//!
//! Offsets advance by one page per request starting at the configured start
//! offset. When the next page would cross the end of the span the sequence
//! resets to the start offset, producing a bounded sawtooth. Every offset
//! lies in `[start_offset, start_offset + span)`.

use crate::address::AddressGenerator;
use rand::RngCore;

/// Sequential offset generator with wraparound
#[derive(Debug)]
pub struct SequentialAddress {
    start_offset: u64,
    page_size: u64,
    /// Pages that fit entirely inside the span
    num_pages: u64,
    current_page: u64,
}

impl SequentialAddress {
    /// Create a generator for the region `[start_offset, start_offset + span)`
    /// advancing `page_size` bytes per request.
    pub fn new(start_offset: u64, span: u64, page_size: u64) -> Self {
        Self {
            start_offset,
            page_size,
            num_pages: span / page_size,
            current_page: 0,
        }
    }
}

impl AddressGenerator for SequentialAddress {
    fn next_offset(&mut self, _rng: &mut dyn RngCore) -> u64 {
        // A span smaller than one page pins every request to the start
        if self.num_pages == 0 {
            return self.start_offset;
        }

        let offset = self.start_offset + self.current_page * self.page_size;

        self.current_page += 1;
        if self.current_page >= self.num_pages {
            self.current_page = 0;
        }

        offset
    }
}
