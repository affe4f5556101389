use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness consumed by the engine. Spawning and item selection only ever
/// ask for these two draws, so tests can script them exactly.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, upper)`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
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
}

impl RandomSource for SessionRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}
