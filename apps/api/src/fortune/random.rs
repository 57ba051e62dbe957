//! Randomness seam for the fortune engine.
//!
//! Every draw (element noise, template choice, scores, luck tier) goes through
//! `RandomSource`, so tests can swap in a seeded generator without changing
//! any call site.

use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[0, upper)`. `upper` must be non-zero.
    fn below(&self, upper: usize) -> usize;

    /// Uniform integer in `[low, high]`.
    fn between(&self, low: u32, high: u32) -> u32 {
        low + self.below((high - low + 1) as usize) as u32
    }

    /// Uniform pick from a fixed, non-empty table.
    fn pick(&self, options: &[&'static str]) -> &'static str {
        options[self.below(options.len())]
    }
}

/// Production source: a fresh draw from the thread-local generator per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Deterministic source for tests and reproducible runs.
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: usize) -> usize {
        self.0.lock().gen_range(0..upper)
    }
}
