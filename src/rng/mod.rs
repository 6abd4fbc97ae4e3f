//! Injectable randomness for terrain generation.
//!
//! Midpoint displacement draws one uniform sample per perturbation site.
//! Keeping the source behind a trait lets tests run deterministically and
//! lets callers replay a terrain from a recorded seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random samples for midpoint displacement.
pub trait RandomSource {
    /// Next uniform sample in [0, 1).
    fn next_uniform(&mut self) -> f64;
}

/// Deterministic ChaCha8-backed random source.
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Create a source that replays the same sequence for the same seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
