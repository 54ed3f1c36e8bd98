//! # Breeding
//!
//! Builds the next generation from a ranked population: the elites are carried over
//! unchanged, selected parents are paired for intermediate crossover, and the remaining
//! selected parents are mutated.
pub mod crossover;
pub mod mutation;

use tracing::trace;

use crate::{
    bounds::Bounds,
    error::{GeneticError, Result},
    individual::Population,
    rng::RandomNumberGenerator,
    selection::StochasticUniversalSampling,
};

pub use crossover::IntermediateCrossover;
pub use mutation::{GaussianMutation, MutationOptions, SIGMA_FLOOR_RATIO};

/// How the slots of one generation are split between elites, crossover and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffspringPlan {
    pub elites: usize,
    pub crossover: usize,
    pub mutation: usize,
}

impl OffspringPlan {
    /// Splits `population_size` slots.
    ///
    /// The crossover share is `round(crossover_rate * population_size)`, capped by the slots
    /// left after the elites and reduced to an even number; every remaining slot is filled
    /// by mutation.
    ///
    /// ```rust
    /// use evomin::breeding::OffspringPlan;
    ///
    /// let plan = OffspringPlan::new(50, 2, 0.6);
    /// assert_eq!((plan.elites, plan.crossover, plan.mutation), (2, 30, 18));
    ///
    /// let plan = OffspringPlan::new(11, 2, 0.5);
    /// assert_eq!((plan.elites, plan.crossover, plan.mutation), (2, 6, 3));
    /// ```
    pub fn new(population_size: usize, elites: usize, crossover_rate: f64) -> Self {
        let elites = elites.min(population_size);
        let needed = population_size - elites;
        let wanted = (crossover_rate * population_size as f64).round() as usize;
        let crossover = wanted.min(needed) / 2 * 2;
        Self {
            elites,
            crossover,
            mutation: needed - crossover,
        }
    }

    /// Number of parents the selector has to supply.
    pub fn parents_needed(&self) -> usize {
        self.crossover + self.mutation
    }

    pub fn total(&self) -> usize {
        self.elites + self.crossover + self.mutation
    }
}

/// Produces offspring gene vectors from a ranked population.
#[derive(Debug, Clone)]
pub struct Breeder {
    plan: OffspringPlan,
    selection: StochasticUniversalSampling,
    crossover: IntermediateCrossover,
    mutation: GaussianMutation,
}

impl Breeder {
    pub fn new(plan: OffspringPlan, mutation: GaussianMutation) -> Self {
        Self {
            plan,
            selection: StochasticUniversalSampling::new(),
            crossover: IntermediateCrossover::new(),
            mutation,
        }
    }

    pub fn plan(&self) -> &OffspringPlan {
        &self.plan
    }

    pub fn mutation(&self) -> &GaussianMutation {
        &self.mutation
    }

    /// Breeds the next generation.
    ///
    /// The result holds the elites first, then the crossover children, then the mutation
    /// children, `plan.total()` vectors in all.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or smaller than the number of elites.
    pub fn breed(
        &self,
        population: &Population,
        sigma: f64,
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Vec<f64>>> {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if population.len() < self.plan.elites {
            return Err(GeneticError::Breeding(format!(
                "Population of {} cannot supply {} elites",
                population.len(),
                self.plan.elites
            )));
        }

        let mut children = Vec::with_capacity(self.plan.total());

        // Always include the elites of the previous generation
        children.extend(
            population
                .top(self.plan.elites)
                .iter()
                .map(|elite| elite.genes().to_vec()),
        );

        let mut parents =
            self.selection
                .select(population, self.plan.parents_needed(), rng)?;
        // SUS returns parents in rank order; shuffle so pairs are not rank neighbours
        rng.shuffle(&mut parents);

        let (crossover_parents, mutation_parents) = parents.split_at(self.plan.crossover);

        for pair in crossover_parents.chunks_exact(2) {
            let p1 = population.get(pair[0])?.genes();
            let p2 = population.get(pair[1])?.genes();
            let (c1, c2) = self.crossover.crossover(p1, p2, rng)?;
            children.push(c1);
            children.push(c2);
        }

        for &parent in mutation_parents {
            let genes = population.get(parent)?.genes();
            children.push(self.mutation.mutate(genes, sigma, bounds, rng)?);
        }

        trace!(
            elites = self.plan.elites,
            crossover = self.plan.crossover,
            mutation = self.plan.mutation,
            sigma,
            "bred next generation"
        );

        Ok(children)
    }
}
