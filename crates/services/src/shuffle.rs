use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Decides the order answer options are shown in.
pub trait AnswerShuffler: Send + Sync {
    fn shuffle(&self, options: &mut [String]);
}

/// Uniform shuffle from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffler;

impl AnswerShuffler for RandomShuffler {
    fn shuffle(&self, options: &mut [String]) {
        options.shuffle(&mut rand::rng());
    }
}

/// Reproducible shuffle: the same seed yields the same sequence of permutations.
#[derive(Debug)]
pub struct SeededShuffler {
    rng: Mutex<StdRng>,
}

impl SeededShuffler {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AnswerShuffler for SeededShuffler {
    fn shuffle(&self, options: &mut [String]) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        options.shuffle(&mut *rng);
    }
}

/// Leaves options in source order (incorrect answers first, correct answer last).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl AnswerShuffler for KeepOrder {
    fn shuffle(&self, _options: &mut [String]) {}
}
