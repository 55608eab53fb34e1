use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness consumed when a tile is spawned.
///
/// Kept as a trait so sessions can be driven by a seeded generator in play
/// and by a fixed script in tests.
pub trait SpawnSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }
}

impl SpawnSource for SessionRng {
    fn choose_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.random_bool(probability)
    }
}

/// Replays queued answers, then falls back to index 0 and `false`.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ScriptedSpawnSource {
    indices: std::collections::VecDeque<usize>,
    chances: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl ScriptedSpawnSource {
    pub(crate) fn new(indices: &[usize], chances: &[bool]) -> Self {
        Self {
            indices: indices.iter().copied().collect(),
            chances: chances.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl SpawnSource for ScriptedSpawnSource {
    fn choose_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0).min(len - 1)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}
