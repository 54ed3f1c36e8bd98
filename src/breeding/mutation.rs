//! # GaussianMutation
//!
//! Adds zero-mean gaussian noise to every coordinate and clips the result into the bounds.
//! The standard deviation shrinks linearly with the generations elapsed since the last
//! reset:
//!
//! ```text
//! sigma_k = sigma_0 * (1 - shrink * k / num_generations)
//! ```
//!
//! `sigma_k` is always derived from `sigma_0`, never from the previous generation's value,
//! and is floored at `sigma_0 * SIGMA_FLOOR_RATIO`.

use crate::bounds::Bounds;
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Smallest sigma the schedule can reach, as a fraction of the initial sigma.
pub const SIGMA_FLOOR_RATIO: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationOptions {
    /// Fraction of `sigma` removed over `num_generations` generations.
    pub shrink: f64,
    /// Initial standard deviation of the gaussian noise.
    pub sigma: f64,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            shrink: 1.0,
            sigma: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMutation {
    options: MutationOptions,
    num_generations: usize,
}

impl GaussianMutation {
    pub fn new(options: MutationOptions, num_generations: usize) -> Self {
        Self {
            options,
            num_generations,
        }
    }

    pub fn options(&self) -> &MutationOptions {
        &self.options
    }

    /// Sigma after `k` generations since the start of the run or the last cataclysm.
    ///
    /// ```rust
    /// use evomin::breeding::{GaussianMutation, MutationOptions};
    ///
    /// let mutation = GaussianMutation::new(MutationOptions { shrink: 1.0, sigma: 2.0 }, 100);
    /// assert_eq!(mutation.sigma_at(0), 2.0);
    /// assert_eq!(mutation.sigma_at(50), 1.0);
    /// assert_eq!(mutation.sigma_at(500), 2.0 * 1e-3);
    /// ```
    pub fn sigma_at(&self, k: usize) -> f64 {
        let sigma_0 = self.options.sigma;
        let progress = if self.num_generations == 0 {
            0.0
        } else {
            k as f64 / self.num_generations as f64
        };
        let sigma = sigma_0 * (1.0 - self.options.shrink * progress);
        sigma.max(sigma_0 * SIGMA_FLOOR_RATIO)
    }

    /// Returns a mutated, clipped copy of `x`.
    pub fn mutate(
        &self,
        x: &[f64],
        sigma: f64,
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<f64>> {
        let noise = rng.fetch_gaussian(sigma, x.len())?;
        let perturbed: Vec<f64> = x.iter().zip(noise).map(|(&v, n)| v + n).collect();
        Ok(bounds.clip(&perturbed))
    }
}
