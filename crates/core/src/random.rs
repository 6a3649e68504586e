//! Randomness used when a job is created.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two draws a new job needs: its delay and its outcome.
///
/// Callers guarantee `min <= max` and `0.0 <= p <= 1.0`; both are validated
/// once by [`crate::JobSettings::new`].
pub trait RandomSource: Send + Sync + core::fmt::Debug {
    /// Uniform draw from the closed interval `[min, max]`.
    fn uniform_delay(&self, min: Duration, max: Duration) -> Duration;

    /// Returns `true` with probability `p`.
    fn bernoulli(&self, p: f64) -> bool;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform_delay(&self, min: Duration, max: Duration) -> Duration {
        rand::thread_rng().gen_range(min..=max)
    }

    fn bernoulli(&self, p: f64) -> bool {
        rand::thread_rng().gen_bool(p)
    }
}

/// Reproducible generator seeded from a fixed value.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform_delay(&self, min: Duration, max: Duration) -> Duration {
        self.rng
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(min..=max)
    }

    fn bernoulli(&self, p: f64) -> bool {
        self.rng.lock().unwrap_or_else(|e| e.into_inner()).gen_bool(p)
    }
}

/// Always returns the same draws. The delay is clamped into `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct FixedDraws {
    pub delay: Duration,
    pub error: bool,
}

impl FixedDraws {
    pub fn new(delay: Duration, error: bool) -> Self {
        Self { delay, error }
    }
}

impl RandomSource for FixedDraws {
    fn uniform_delay(&self, min: Duration, max: Duration) -> Duration {
        self.delay.clamp(min, max)
    }

    fn bernoulli(&self, _p: f64) -> bool {
        self.error
    }
}
