//! Random draws for the producer
//!
//! The producer only needs uniform integers below a bound. Firmware uses a
//! `SmallRng` seeded once at startup; tests feed scripted values.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws
pub trait RandomSource {
    /// Uniform value in `[0, bound)`; returns 0 when `bound` is 0
    fn next_below(&mut self, bound: u64) -> u64;
}

impl RandomSource for SmallRng {
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.gen_range(0..bound)
    }
}

/// Non-cryptographic generator seeded once at startup
pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
