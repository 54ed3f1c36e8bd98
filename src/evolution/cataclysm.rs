//! # Cataclysm
//!
//! Partial restart of a stalled population: the best `round(survivors * population_size)`
//! individuals are kept and every other slot is refilled with a fresh vector drawn uniformly
//! from the bounds.

use tracing::info;

use crate::bounds::Bounds;
use crate::individual::Population;
use crate::rng::RandomNumberGenerator;

#[derive(Debug, Clone, PartialEq)]
pub struct Cataclysm {
    survivors: f64,
}

impl Cataclysm {
    /// `survivors` is the fraction of the population kept, in `[0, 1]`.
    pub fn new(survivors: f64) -> Self {
        Self { survivors }
    }

    pub fn survivor_count(&self, population_size: usize) -> usize {
        ((self.survivors * population_size as f64).round() as usize).min(population_size)
    }

    /// Builds the post-cataclysm population: survivors first, then regenerated vectors.
    pub fn strike(
        &self,
        population: &Population,
        population_size: usize,
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Vec<f64>> {
        let kept = self.survivor_count(population_size).min(population.len());

        let mut next: Vec<Vec<f64>> = population
            .top(kept)
            .iter()
            .map(|survivor| survivor.genes().to_vec())
            .collect();
        next.extend((kept..population_size).map(|_| bounds.sample(rng)));

        info!(
            survivors = kept,
            regenerated = population_size - kept,
            best = population.best().fitness(),
            "cataclysm"
        );

        next
    }
}
