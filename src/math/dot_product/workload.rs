//! Input generation for dot product benchmarks.
//!
//! Values are drawn uniformly from `[1, 10)`. Runs are seeded from OS entropy
//! unless an explicit seed is given; only the value range is guaranteed, not
//! the exact sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inclusive lower bound of generated values
pub const VALUE_LOW: f64 = 1.0;
/// Exclusive upper bound of generated values
pub const VALUE_HIGH: f64 = 10.0;

/// A pair of equal-length input vectors.
#[derive(Clone, Debug, Default)]
pub struct Workload {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl Workload {
    /// Number of elements in each vector
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Produces workloads of any requested length.
pub struct WorkloadGenerator {
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Generator with a fixed seed, for repeatable runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Fill one vector of length `n`.
    pub fn vector(&mut self, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| self.rng.random_range(VALUE_LOW..VALUE_HIGH))
            .collect()
    }

    /// Generate two fresh vectors of length `n`.
    pub fn generate(&mut self, n: usize) -> Workload {
        let a = self.vector(n);
        let b = self.vector(n);
        Workload { a, b }
    }
}
