//! Address generation
//!
//! This module produces the byte offset for each IO request. Two patterns
//! are supported:
//!
//! - **Sequential**: offsets advance by one page per request from the start
//!   offset and wrap back when the span is exhausted (bounded sawtooth)
//! - **Uniform**: offsets drawn uniformly from the span and aligned down to
//!   the sector boundary
//!
//! # Randomness
//!
//! Generators do not own a random source. The worker passes its single
//! persistent per-thread RNG into every call, so address generation and
//! read/write selection share one stream that is seeded exactly once per
//! worker. Reseeding per draw from a coarse clock would collapse the
//! sequence to a handful of values at high request rates.
//!
//! # Example
//!
//! ```
//! use iobench::address::{AddressGenerator, uniform::UniformAddress};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
//! let mut gen = UniformAddress::new(1 << 20);
//! let offset = gen.next_offset(&mut rng);
//! assert!(offset < 1 << 20);
//! assert_eq!(offset % 512, 0);
//! ```

use rand::RngCore;

/// Generator of byte offsets for successive IO requests
///
/// Implementations must be `Send` so a generator can move into its worker
/// thread. Each worker owns exactly one generator; there is no shared state
/// on the hot path.
pub trait AddressGenerator: Send {
    /// Return the byte offset for the next request
    ///
    /// `rng` is the calling worker's persistent random stream. Sequential
    /// generation ignores it; random generation draws from it.
    fn next_offset(&mut self, rng: &mut dyn RngCore) -> u64;
}

pub mod sequential;
pub mod uniform;
