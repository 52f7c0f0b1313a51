//! Injected random source for boss decisions and particle spread.
//!
//! The simulation never reaches for a thread-local generator. Callers hand the
//! world an [`AiRng`]; the default is a ChaCha8 stream seeded from the tuning,
//! so identical seeds and inputs replay identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait AiRng {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f32;

    fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }
}

pub struct SeededRng(ChaCha8Rng);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl AiRng for SeededRng {
    fn unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

/// Always returns the same sample. Lets tests force or forbid every roll.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub f32);

impl AiRng for FixedRng {
    fn unit(&mut self) -> f32 {
        self.0
    }
}
