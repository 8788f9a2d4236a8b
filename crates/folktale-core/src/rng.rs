//! Random number generator abstraction for determinism.
//!
//! In production this wraps a seeded `StdRng`. Tests inject a scripted
//! implementation so that outcome-text selection is repeatable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Picks an index into a collection of `len` items, or `None` when the
    /// collection is empty.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        let last = u32::try_from(len.checked_sub(1)?).unwrap_or(u32::MAX);
        let picked = self.next_u32_range(0, last) as usize;
        Some(picked.min(len - 1))
    }
}

/// Production RNG backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRngSource(StdRng);

impl StdRngSource {
    /// Creates an RNG with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl DeterministicRng for StdRngSource {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }
}
