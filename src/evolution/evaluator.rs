use crate::{
    constraints::{ConstraintSet, PenaltyState},
    error::{GeneticError, Result},
    individual::Individual,
};

use super::objective::Objective;

/// Scores decision vectors: raw objective value plus the current constraint penalty.
pub struct FitnessEvaluator<'a, O: Objective> {
    objective: &'a O,
    constraints: &'a ConstraintSet,
}

impl<'a, O: Objective> FitnessEvaluator<'a, O> {
    pub fn new(objective: &'a O, constraints: &'a ConstraintSet) -> Self {
        Self {
            objective,
            constraints,
        }
    }

    /// Scores a single vector.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessCalculation` if the objective or one of the constraints
    /// evaluates to NaN, or if the penalized fitness is NaN.
    pub fn evaluate(&self, genes: Vec<f64>, penalty: &PenaltyState) -> Result<Individual> {
        let score = self.objective.evaluate(&genes);
        if score.is_nan() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Objective returned NaN for {:?}",
                genes
            )));
        }

        let violations = self
            .constraints
            .violations(&genes, penalty.options().eq_tolerance);
        if let Some((kind, index, _)) = violations
            .iter()
            .zip(self.constraints.iter())
            .find_map(|(v, constraint)| v.is_nan().then_some(constraint))
        {
            return Err(GeneticError::FitnessCalculation(format!(
                "{:?} constraint #{} returned NaN for {:?}",
                kind, index, genes
            )));
        }

        let fitness = score + penalty.penalty_for(&violations);
        if fitness.is_nan() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Penalized fitness is NaN for {:?}",
                genes
            )));
        }

        let violation: f64 = violations.iter().sum();
        Ok(Individual::new(genes, score, fitness).with_violation(violation))
    }

    /// Scores every vector of a generation, preserving order.
    pub fn evaluate_all(
        &self,
        population: Vec<Vec<f64>>,
        penalty: &PenaltyState,
    ) -> Result<Vec<Individual>> {
        population
            .into_iter()
            .map(|genes| self.evaluate(genes, penalty))
            .collect()
    }
}
