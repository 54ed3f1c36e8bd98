//! # Individuals and Populations
//!
//! An `Individual` is a decision vector together with the raw objective value and the
//! penalized fitness it received in one generation. Lower fitness is better.
//!
//! A `Population` is one generation of scored individuals sorted from best to worst, so the
//! position of an individual determines its rank (`rank = index + 1`). Ties keep the order in
//! which the individuals were evaluated.
//!
//! ```rust
//! use evomin::individual::{Individual, Population};
//!
//! let population = Population::ranked(vec![
//!     Individual::new(vec![0.0], 3.0, 3.0),
//!     Individual::new(vec![1.0], 1.0, 1.0),
//!     Individual::new(vec![2.0], 2.0, 2.0),
//! ]).unwrap();
//!
//! assert_eq!(population.best().genes(), &[1.0]);
//! ```
//!
//! Fitness values from different generations are not comparable, because the penalty grows
//! with the generation counter. Individuals from different generations are compared with
//! [`Individual::cmp_feasibility`] instead: feasible beats infeasible, feasible individuals
//! compare by raw score, infeasible ones by their total constraint violation.

use std::cmp::Ordering;

use crate::error::{GeneticError, OptionExt, Result};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genes: Vec<f64>,
    /// Raw objective value.
    score: f64,
    /// Objective value plus constraint penalty.
    fitness: f64,
    /// Sum of the constraint violation amounts; zero when feasible.
    violation: f64,
}

impl Individual {
    pub fn new(genes: Vec<f64>, score: f64, fitness: f64) -> Self {
        Self {
            genes,
            score,
            fitness,
            violation: 0.0,
        }
    }

    /// Sets the total constraint violation.
    pub fn with_violation(mut self, violation: f64) -> Self {
        self.violation = violation;
        self
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn penalty(&self) -> f64 {
        self.fitness - self.score
    }

    pub fn violation(&self) -> f64 {
        self.violation
    }

    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    pub fn into_genes(self) -> Vec<f64> {
        self.genes
    }

    /// Minimization order on fitness; incomparable values are treated as equal so a stable
    /// sort keeps their evaluation order.
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness
            .partial_cmp(&other.fitness)
            .unwrap_or(Ordering::Equal)
    }

    /// Order that stays meaningful across generations scored under different penalties.
    ///
    /// ```rust
    /// use evomin::individual::Individual;
    ///
    /// let feasible = Individual::new(vec![-4.0, 10.0], -40.0, -40.0);
    /// let cheating = Individual::new(vec![-10.0, 10.0], -100.0, -64.0).with_violation(6.0);
    ///
    /// assert!(cheating.cmp_fitness(&feasible).is_lt());
    /// assert!(feasible.cmp_feasibility(&cheating).is_lt());
    /// ```
    pub fn cmp_feasibility(&self, other: &Self) -> Ordering {
        match (self.is_feasible(), other.is_feasible()) {
            (true, true) => self
                .score
                .partial_cmp(&other.score)
                .unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .violation
                .partial_cmp(&other.violation)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.cmp_fitness(other)),
        }
    }
}

/// One generation of scored individuals, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    members: Vec<Individual>,
}

impl Population {
    /// Sorts `members` by fitness (stable) and wraps them.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `members` is empty.
    pub fn ranked(mut members: Vec<Individual>) -> Result<Self> {
        if members.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        members.sort_by(Individual::cmp_fitness);
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Result<&Individual> {
        self.members.get(index).ok_or_else_genetic(|| {
            GeneticError::Selection(format!(
                "Index {} is outside a population of {}",
                index,
                self.members.len()
            ))
        })
    }

    pub fn best(&self) -> &Individual {
        &self.members[0]
    }

    /// The first individual that no other member beats under
    /// [`Individual::cmp_feasibility`].
    pub fn most_feasible(&self) -> &Individual {
        self.members
            .iter()
            .reduce(|best, candidate| {
                if candidate.cmp_feasibility(best).is_lt() {
                    candidate
                } else {
                    best
                }
            })
            .unwrap_or(&self.members[0])
    }

    /// The `n` best individuals (fewer if the population is smaller).
    pub fn top(&self, n: usize) -> &[Individual] {
        &self.members[..n.min(self.members.len())]
    }
}
