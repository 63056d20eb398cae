//! # Roll Sources
//!
//! The crafter draws one uniform value in `[0, 1)` per completed craft and
//! compares it against the recipe's success rate. The source of those
//! values is injected so outcomes are reproducible: a session seeds one
//! generator and reuses it for every craft, and tests pin the value.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform rolls in `[0, 1)`.
pub trait RollSource {
    /// Draws the next value.
    fn roll(&mut self) -> f64;
}

impl<R: RollSource + ?Sized> RollSource for Box<R> {
    fn roll(&mut self) -> f64 {
        (**self).roll()
    }
}

/// ChaCha8 stream, seeded once and reused across crafts.
#[derive(Clone, Debug)]
pub struct SeededRolls {
    rng: ChaCha8Rng,
}

impl SeededRolls {
    /// Same seed, same sequence of rolls.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeds from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RollSource for SeededRolls {
    #[inline]
    fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRoll(pub f64);

impl RollSource for FixedRoll {
    #[inline]
    fn roll(&mut self) -> f64 {
        self.0
    }
}

/// Plays back a queue of values, then repeats the last one.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    queue: VecDeque<f64>,
    last: f64,
}

impl ScriptedRolls {
    /// Creates a script. An empty script rolls 0.0 forever.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            last: 0.0,
        }
    }

    /// Values not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        if let Some(value) = self.queue.pop_front() {
            self.last = value;
        }
        self.last
    }
}
