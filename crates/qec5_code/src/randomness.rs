//! Classical randomness for error injection
//!
//! Gantree: L3_Code → Randomness
//!
//! The error channel only needs uniform integers in an inclusive range.
//! Keeping that behind a trait lets tests script the exact draws.

use qec5_core::{QecError, QecResult};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of uniform integers
/// Gantree: RandomnessProvider // draw_int(low, high)
pub trait RandomnessProvider: Send {
    /// Uniform integer in `low..=high`
    fn draw_int(&mut self, low: i64, high: i64) -> QecResult<i64>;
}

/// Seedable pseudo-random provider
pub struct SeededRandomness {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl SeededRandomness {
    /// Reproducible stream from `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Stream seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Seed in use, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for SeededRandomness {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomnessProvider for SeededRandomness {
    fn draw_int(&mut self, low: i64, high: i64) -> QecResult<i64> {
        if low > high {
            return Err(QecError::RandomOutOfRange {
                value: low,
                low,
                high,
            });
        }
        Ok(self.rng.gen_range(low..=high))
    }
}

/// Scripted provider returning a fixed sequence of values
///
/// Values are returned as-is, without range checks, so callers can be
/// tested against misbehaving sources.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: VecDeque<i64>,
    drawn: usize,
}

impl FixedSequence {
    /// Provider yielding `values` in order
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            drawn: 0,
        }
    }

    /// Values not yet drawn
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomnessProvider for FixedSequence {
    fn draw_int(&mut self, _low: i64, _high: i64) -> QecResult<i64> {
        let value = self
            .values
            .pop_front()
            .ok_or(QecError::RandomExhausted(self.drawn))?;
        self.drawn += 1;
        Ok(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
