//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a run. It is
//! threaded explicitly through selection, crossover, mutation and cataclysm regeneration,
//! so two runs started from the same seed draw exactly the same numbers.
//!
//! ## Example
//!
//! ```rust
//! use evomin::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let random_numbers = rng.fetch_uniform(0.0, 1.0, 5);
//!
//! for number in random_numbers {
//!     assert!((0.0..1.0).contains(&number));
//! }
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::{GeneticError, Result};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the solver needs.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a single number uniformly from `[from, to)`.
    ///
    /// Returns `from` when the range is empty, so degenerate intervals never panic.
    pub fn uniform(&mut self, from: f64, to: f64) -> f64 {
        if from < to && (to - from).is_finite() {
            self.rng.gen_range(from..to)
        } else if from < to {
            self.halved_uniform(from, to)
        } else {
            from
        }
    }

    /// Draws a single number uniformly from the closed interval `[from, to]`.
    ///
    /// Finite intervals wider than `f64::MAX` are accepted as well.
    pub fn uniform_inclusive(&mut self, from: f64, to: f64) -> f64 {
        if from < to && (to - from).is_finite() {
            self.rng.gen_range(from..=to)
        } else if from < to {
            self.halved_uniform(from, to)
        } else {
            from
        }
    }

    // `to - from` overflows, so interpolate between the halved ends instead.
    fn halved_uniform(&mut self, from: f64, to: f64) -> f64 {
        let u: f64 = self.rng.gen();
        ((from / 2.0 + u * (to / 2.0 - from / 2.0)) * 2.0).clamp(from, to)
    }

    /// Generates a specified number of random floating-point numbers within `[from, to)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use evomin::rng::RandomNumberGenerator;
    ///
    /// let mut rng = RandomNumberGenerator::from_seed(1);
    /// let random_numbers = rng.fetch_uniform(-1.0, 1.0, 3);
    /// assert_eq!(random_numbers.len(), 3);
    /// ```
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> Vec<f64> {
        (0..num).map(|_| self.uniform(from, to)).collect()
    }

    /// Generates `num` samples from a zero-mean normal distribution with the given
    /// standard deviation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::RandomGeneration` if `sigma` is negative or not finite.
    pub fn fetch_gaussian(&mut self, sigma: f64, num: usize) -> Result<Vec<f64>> {
        let normal = Normal::new(0.0, sigma).map_err(|e| {
            GeneticError::RandomGeneration(format!(
                "Invalid standard deviation {} for gaussian noise: {}",
                sigma, e
            ))
        })?;
        Ok((0..num).map(|_| normal.sample(&mut self.rng)).collect())
    }

    /// Shuffles a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
