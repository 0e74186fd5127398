use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::train::algorithm::Algorithm;

/// Source of the per-epoch sample permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shuffle {
    /// Fresh entropy per run.
    Auto,
    /// Deterministic permutations for reproducible runs.
    Seeded(u64),
}

impl Default for Shuffle {
    fn default() -> Shuffle {
        Shuffle::Auto
    }
}

impl Shuffle {
    pub(crate) fn rng(self) -> StdRng {
        match self {
            Shuffle::Auto => StdRng::from_entropy(),
            Shuffle::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Hyperparameters for one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    pub learning_rate: f64,
    pub epochs: usize,
    pub algorithm: Algorithm,
    pub shuffle: Shuffle,
}

impl Default for TrainOptions {
    fn default() -> TrainOptions {
        TrainOptions {
            learning_rate: 0.01,
            epochs: 100,
            algorithm: Algorithm::default(),
            shuffle: Shuffle::default(),
        }
    }
}

impl TrainOptions {
    pub fn new(learning_rate: f64, epochs: usize) -> TrainOptions {
        TrainOptions {
            learning_rate,
            epochs,
            ..TrainOptions::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> TrainOptions {
        self.algorithm = algorithm;
        self
    }

    pub fn with_shuffle(mut self, shuffle: Shuffle) -> TrainOptions {
        self.shuffle = shuffle;
        self
    }
}
