//! # Bounds
//!
//! Box constraints `LB[i] <= x[i] <= UB[i]` for every decision variable. Mutation output is
//! clipped against them and new individuals are sampled inside them.
//!
//! Infinite bounds are allowed. Sampling on an open side falls back to an interval of
//! `UNBOUNDED_SAMPLING_RADIUS` around the finite side, or around the origin when both
//! sides are open.
//!
//! ## Example
//!
//! ```rust
//! use evomin::bounds::Bounds;
//!
//! let bounds = Bounds::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
//! assert_eq!(bounds.clip(&[2.0, -3.0]), vec![1.0, -1.0]);
//! ```

use tracing::warn;

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Half-width of the sampling interval used for open-ended dimensions.
pub const UNBOUNDED_SAMPLING_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from explicit lower and upper vectors.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the vectors are empty, differ in length,
    /// contain NaN, or if `lower[i] > upper[i]` for some `i`.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.is_empty() {
            return Err(GeneticError::Configuration(
                "Bounds must cover at least one variable".to_string(),
            ));
        }

        if lower.len() != upper.len() {
            return Err(GeneticError::Configuration(format!(
                "Lower bound length ({}) doesn't match upper bound length ({})",
                lower.len(),
                upper.len()
            )));
        }

        for (i, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(GeneticError::Configuration(format!(
                    "Bounds of variable {} contain NaN",
                    i
                )));
            }
            if lo > hi {
                return Err(GeneticError::Configuration(format!(
                    "Lower bound {} exceeds upper bound {} for variable {}",
                    lo, hi, i
                )));
            }
            if lo == hi {
                warn!(variable = i, value = lo, "degenerate bounds, variable is fixed");
            }
        }

        Ok(Self { lower, upper })
    }

    /// Creates bounds that leave every one of `nvars` variables unconstrained.
    pub fn unbounded(nvars: usize) -> Self {
        Self {
            lower: vec![f64::NEG_INFINITY; nvars],
            upper: vec![f64::INFINITY; nvars],
        }
    }

    pub fn nvars(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Indices of variables whose lower and upper bound coincide.
    pub fn degenerate_dimensions(&self) -> Vec<usize> {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .enumerate()
            .filter(|(_, (lo, hi))| lo == hi)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a copy of `x` with every coordinate clamped into its bounds.
    pub fn clip(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .map(|(&value, (&lo, &hi))| value.max(lo).min(hi))
            .collect()
    }

    /// Returns `true` if every coordinate of `x` lies inside its bounds.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.nvars()
            && x
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&value, (&lo, &hi))| lo <= value && value <= hi)
    }

    /// Finite interval used when sampling variable `i`.
    pub fn sampling_interval(&self, i: usize) -> (f64, f64) {
        let (lo, hi) = (self.lower[i], self.upper[i]);
        match (lo.is_finite(), hi.is_finite()) {
            (true, true) => (lo, hi),
            (true, false) => (lo, lo + 2.0 * UNBOUNDED_SAMPLING_RADIUS),
            (false, true) => (hi - 2.0 * UNBOUNDED_SAMPLING_RADIUS, hi),
            (false, false) => (-UNBOUNDED_SAMPLING_RADIUS, UNBOUNDED_SAMPLING_RADIUS),
        }
    }

    /// Draws a vector uniformly from the sampling box.
    pub fn sample(&self, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        (0..self.nvars())
            .map(|i| {
                let (lo, hi) = self.sampling_interval(i);
                rng.uniform_inclusive(lo, hi)
            })
            .collect()
    }
}
