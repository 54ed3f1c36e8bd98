use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::individual::Population;
use crate::rng::RandomNumberGenerator;

/// Stochastic universal sampling over rank-scaled fitness.
///
/// Each individual of rank `k` (1 = best) receives a scaled fitness proportional to
/// `1 / sqrt(k)`, normalized so the scaled values sum to the number of parents requested.
/// A single uniform offset then places equally spaced pointers along the cumulative
/// sequence, and every pointer picks one parent. Compared to spinning a roulette wheel once
/// per parent, the number of copies of each individual never strays more than one from its
/// expected value.
///
/// # Examples
///
/// ```
/// use evomin::individual::{Individual, Population};
/// use evomin::rng::RandomNumberGenerator;
/// use evomin::selection::StochasticUniversalSampling;
///
/// let population = Population::ranked(
///     (0..6).map(|i| Individual::new(vec![i as f64], i as f64, i as f64)).collect(),
/// ).unwrap();
///
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let parents = StochasticUniversalSampling::new()
///     .select(&population, 4, &mut rng)
///     .unwrap();
///
/// assert_eq!(parents.len(), 4);
/// assert!(parents.iter().all(|&i| i < population.len()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StochasticUniversalSampling;

impl StochasticUniversalSampling {
    pub fn new() -> Self {
        Self
    }

    /// Rank-scaled fitness for `population_size` ranked individuals, best first, summing to
    /// `num_to_select`.
    pub fn scaled_fitness(population_size: usize, num_to_select: usize) -> Vec<f64> {
        let raw: Vec<f64> = (1..=population_size)
            .map(|rank| 1.0 / (rank as f64).sqrt())
            .collect();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return raw;
        }

        let scale = num_to_select as f64 / total;
        raw.into_iter().map(|s| s * scale).collect()
    }

    /// Selects `num_to_select` parents from a ranked population.
    ///
    /// Returns indices into `population` in pointer order, so better-ranked parents come
    /// first. The same individual may be returned more than once.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if the population is empty.
    pub fn select(
        &self,
        population: &Population,
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if num_to_select == 0 {
            return Ok(Vec::new());
        }

        let scaled = Self::scaled_fitness(population.len(), num_to_select);
        let total: f64 = scaled.iter().sum();
        let spacing = total / num_to_select as f64;
        let start = rng.uniform(0.0, spacing);

        let mut selected = Vec::with_capacity(num_to_select);
        let mut index = 0;
        let mut cumulative = scaled[0];
        let last = scaled.len() - 1;

        for i in 0..num_to_select {
            let pointer = start + i as f64 * spacing;
            // Rounding in the cumulative sum may leave the final pointers just past the end.
            while cumulative < pointer && index < last {
                index += 1;
                cumulative += scaled[index];
            }
            selected.push(index);
        }

        trace!(num_to_select, start, spacing, "stochastic universal sampling");

        Ok(selected)
    }
}
