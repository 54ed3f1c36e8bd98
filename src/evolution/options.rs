//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds every tunable of a run: generation budget, population
//! layout, operator parameters, the penalty constants, stall detection and the cataclysm
//! survivor share.
//!
//! ## Example
//!
//! ```rust
//! use evomin::evolution::options::EvolutionOptions;
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(200, 80);
//! assert_eq!(custom_options.get_population_size(), 80);
//!
//! // Create a new EvolutionOptions instance with default parameters
//! let default_options = EvolutionOptions::default();
//! assert_eq!(default_options.get_num_generations(), 100);
//! assert!(default_options.validate().is_ok());
//! ```
//!
//! ## Defaults
//!
//! | option              | default |
//! |---------------------|---------|
//! | `num_generations`   | 100     |
//! | `population_size`   | 50      |
//! | `elites`            | 2       |
//! | `crossover_rate`    | 0.6     |
//! | `mutation`          | shrink 1, sigma 1 |
//! | `penalty`           | C 1, alpha 2, beta 2 |
//! | `stall`             | tolerance 0.01, 5 generations |
//! | `survivors`         | 0.2     |
//! | `seed`              | none (entropy) |

use crate::{
    breeding::MutationOptions,
    constraints::PenaltyOptions,
    error::{GeneticError, Result},
};

use super::stall::StallOptions;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionOptions {
    num_generations: usize,
    population_size: usize,
    elites: usize,
    crossover_rate: f64,
    mutation: MutationOptions,
    penalty: PenaltyOptions,
    stall: StallOptions,
    /// Fraction of the population kept by a cataclysm.
    survivors: f64,
    /// Seed for `EvolutionLauncher::run`; entropy when `None`.
    seed: Option<u64>,
}

impl EvolutionOptions {
    pub fn new(num_generations: usize, population_size: usize) -> Self {
        Self {
            num_generations,
            population_size,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_elites(&self) -> usize {
        self.elites
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_mutation(&self) -> &MutationOptions {
        &self.mutation
    }

    pub fn get_penalty(&self) -> &PenaltyOptions {
        &self.penalty
    }

    pub fn get_stall(&self) -> &StallOptions {
        &self.stall
    }

    pub fn get_survivors(&self) -> f64 {
        self.survivors
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_elites(&mut self, elites: usize) {
        self.elites = elites;
    }

    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    pub fn set_mutation(&mut self, mutation: MutationOptions) {
        self.mutation = mutation;
    }

    pub fn set_penalty(&mut self, penalty: PenaltyOptions) {
        self.penalty = penalty;
    }

    pub fn set_stall(&mut self, stall: StallOptions) {
        self.stall = stall;
    }

    pub fn set_survivors(&mut self, survivors: f64) {
        self.survivors = survivors;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Checks every option against its valid range.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` naming the first invalid option.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(GeneticError::Configuration(msg.to_string()));

        if self.population_size == 0 {
            return fail("Population size cannot be zero");
        }
        if self.num_generations == 0 {
            return fail("Number of generations cannot be zero");
        }
        if self.elites > self.population_size {
            return fail("Number of elites cannot exceed the population size");
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return fail("Crossover rate must lie in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.survivors) {
            return fail("Survivor fraction must lie in [0, 1]");
        }
        if !(self.mutation.sigma.is_finite() && self.mutation.sigma > 0.0) {
            return fail("Mutation sigma must be positive and finite");
        }
        if !(self.mutation.shrink.is_finite() && self.mutation.shrink >= 0.0) {
            return fail("Mutation shrink cannot be negative");
        }
        if !(self.penalty.c.is_finite() && self.penalty.c >= 0.0) {
            return fail("Penalty constant C cannot be negative");
        }
        if !(self.penalty.alpha.is_finite() && self.penalty.alpha > 0.0) {
            return fail("Penalty exponent alpha must be positive");
        }
        if !(self.penalty.beta.is_finite() && self.penalty.beta > 0.0) {
            return fail("Penalty exponent beta must be positive");
        }
        if !(self.penalty.eq_tolerance >= 0.0) {
            return fail("Equality tolerance cannot be negative");
        }
        if self.stall.generations < 2 {
            return fail("Stall window must span at least two generations");
        }
        if self.stall.tolerance.is_nan() {
            return fail("Stall tolerance cannot be NaN");
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evomin::evolution::options::EvolutionOptions;
    ///
    /// let options = EvolutionOptions::builder()
    ///     .num_generations(200)
    ///     .population_size(80)
    ///     .elites(4)
    ///     .crossover_rate(0.7)
    ///     .seed(42)
    ///     .build();
    ///
    /// assert_eq!(options.get_elites(), 4);
    /// assert_eq!(options.get_seed(), Some(42));
    /// ```
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 100,
            population_size: 50,
            elites: 2,
            crossover_rate: 0.6,
            mutation: MutationOptions::default(),
            penalty: PenaltyOptions::default(),
            stall: StallOptions::default(),
            survivors: 0.2,
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances. Options that
/// are never set keep their default.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    options: EvolutionOptions,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.options.num_generations = value;
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.options.population_size = value;
        self
    }

    pub fn elites(mut self, value: usize) -> Self {
        self.options.elites = value;
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.options.crossover_rate = value;
        self
    }

    pub fn mutation(mut self, shrink: f64, sigma: f64) -> Self {
        self.options.mutation = MutationOptions { shrink, sigma };
        self
    }

    pub fn penalty(mut self, value: PenaltyOptions) -> Self {
        self.options.penalty = value;
        self
    }

    pub fn stall(mut self, tolerance: f64, generations: usize) -> Self {
        self.options.stall = StallOptions {
            tolerance,
            generations,
        };
        self
    }

    pub fn survivors(mut self, value: f64) -> Self {
        self.options.survivors = value;
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.options.seed = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_configuration_error(options: EvolutionOptions, needle: &str) {
        match options.validate() {
            Err(GeneticError::Configuration(msg)) => {
                assert!(msg.contains(needle), "unexpected message: {}", msg)
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let options = EvolutionOptions::default();
        assert_eq!(options.get_num_generations(), 100);
        assert_eq!(options.get_population_size(), 50);
        assert_eq!(options.get_elites(), 2);
        assert_eq!(options.get_crossover_rate(), 0.6);
        assert_eq!(options.get_mutation(), &MutationOptions::default());
        assert_eq!(options.get_penalty(), &PenaltyOptions::default());
        assert_eq!(options.get_stall(), &StallOptions::default());
        assert_eq!(options.get_survivors(), 0.2);
        assert_eq!(options.get_seed(), None);
    }

    #[test]
    fn test_setters() {
        let mut options = EvolutionOptions::default();
        options.set_num_generations(10);
        options.set_population_size(12);
        options.set_elites(1);
        options.set_crossover_rate(0.5);
        options.set_survivors(0.5);
        options.set_seed(Some(3));
        options.set_stall(StallOptions {
            tolerance: 0.1,
            generations: 3,
        });

        assert_eq!(options.get_num_generations(), 10);
        assert_eq!(options.get_population_size(), 12);
        assert_eq!(options.get_elites(), 1);
        assert_eq!(options.get_crossover_rate(), 0.5);
        assert_eq!(options.get_survivors(), 0.5);
        assert_eq!(options.get_seed(), Some(3));
        assert_eq!(options.get_stall().generations, 3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_sizes() {
        expect_configuration_error(EvolutionOptions::new(100, 0), "Population size");
        expect_configuration_error(EvolutionOptions::new(0, 10), "generations");
        expect_configuration_error(
            EvolutionOptions::builder()
                .population_size(3)
                .elites(4)
                .build(),
            "elites",
        );
    }

    #[test]
    fn test_invalid_rates() {
        expect_configuration_error(
            EvolutionOptions::builder().crossover_rate(1.5).build(),
            "Crossover rate",
        );
        expect_configuration_error(
            EvolutionOptions::builder().crossover_rate(-0.1).build(),
            "Crossover rate",
        );
        expect_configuration_error(
            EvolutionOptions::builder().survivors(2.0).build(),
            "Survivor",
        );
    }

    #[test]
    fn test_invalid_operator_parameters() {
        expect_configuration_error(
            EvolutionOptions::builder().mutation(1.0, 0.0).build(),
            "sigma",
        );
        expect_configuration_error(
            EvolutionOptions::builder().mutation(-1.0, 1.0).build(),
            "shrink",
        );
        expect_configuration_error(
            EvolutionOptions::builder().stall(0.01, 1).build(),
            "Stall window",
        );
        expect_configuration_error(
            EvolutionOptions::builder()
                .penalty(PenaltyOptions {
                    alpha: 0.0,
                    ..PenaltyOptions::default()
                })
                .build(),
            "alpha",
        );
    }

    #[test]
    fn test_builder_keeps_unset_defaults() {
        let options = EvolutionOptions::builder().population_size(20).build();
        assert_eq!(options.get_population_size(), 20);
        assert_eq!(options.get_num_generations(), 100);
        assert_eq!(options.get_elites(), 2);
    }
}
