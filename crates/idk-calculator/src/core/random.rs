//! Randomness seam for the estimate engine
//!
//! Decoys are drawn through [`RandomSource`] so tests and `--seed` runs can
//! reproduce them exactly. Anything implementing [`rand::RngCore`] is a
//! source; [`SequenceSource`] replays a fixed list of draws.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    /// Returns the next uniform draw in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Creates a deterministic generator from a seed
#[must_use]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from the OS entropy pool
#[must_use]
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Replays a fixed, cycling list of draws
///
/// Values are clamped into `[0, 1)`. An empty sequence always yields `0.5`,
/// i.e. a decoy equal to the true result before rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Largest value strictly below 1.0
    const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

    /// Creates a source that cycles through `values`
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Creates a source that always returns the same draw
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.5;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, Self::MAX_UNIT)
    }
}
