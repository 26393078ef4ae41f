use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of every random decision the search makes.
///
/// The exploration branch of selection and the rollout both draw from the same generator, so a
/// seeded implementation makes a whole search reproducible.
pub trait RandomGenerator: Default {
    /// Returns a value uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns an index uniformly distributed in `[0, len)`. `len` must be positive.
    fn next_index(&mut self, len: usize) -> usize;

    fn choose<'a, K>(&mut self, slice: &'a [K]) -> Option<&'a K> {
        if slice.is_empty() {
            None
        } else {
            slice.get(self.next_index(slice.len()))
        }
    }
}

/// Non-reproducible generator backed by the thread-local RNG.
pub struct StandardRandomGenerator {
    rng: ThreadRng,
}

impl Default for StandardRandomGenerator {
    fn default() -> Self {
        StandardRandomGenerator { rng: rand::rng() }
    }
}

impl RandomGenerator for StandardRandomGenerator {
    fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Reproducible generator: the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_f64(&mut self) -> f64 {
        self.rng.random()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

impl SeededRandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
