use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the opponent's random choices: the opening corner and the
/// tie-break among equally scored moves.
pub trait MovePicker {
    /// Returns an index in `0..n`. Callers never pass `n == 0`.
    fn pick(&mut self, n: usize) -> usize;
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
}

impl MovePicker for SessionRng {
    fn pick(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}
