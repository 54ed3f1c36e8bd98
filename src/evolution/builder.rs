use crate::{
    bounds::Bounds,
    constraints::{Constraint, ConstraintSet},
    error::{GeneticError, Result},
};

use super::{EvolutionLauncher, EvolutionOptions, Objective};

/// Fluent construction of an [`EvolutionLauncher`].
///
/// The objective is mandatory, and so is the problem dimension: either through
/// [`with_nvars`](Self::with_nvars) or implied by [`with_bounds`](Self::with_bounds).
/// Everything else has a default: unbounded variables, no constraints and
/// `EvolutionOptions::default()`.
pub struct EvolutionLauncherBuilder<O: Objective> {
    objective: Option<O>,
    nvars: Option<usize>,
    bounds: Option<(Vec<f64>, Vec<f64>)>,
    constraints: ConstraintSet,
    options: Option<EvolutionOptions>,
}

impl<O: Objective> EvolutionLauncherBuilder<O> {
    pub fn new() -> Self {
        Self {
            objective: None,
            nvars: None,
            bounds: None,
            constraints: ConstraintSet::new(),
            options: None,
        }
    }

    pub fn with_objective(mut self, objective: O) -> Self {
        self.objective = Some(objective);
        self
    }

    pub fn with_nvars(mut self, nvars: usize) -> Self {
        self.nvars = Some(nvars);
        self
    }

    pub fn with_bounds(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Adds an inequality constraint, satisfied when `c(x) <= 0`.
    pub fn with_inequality<C>(mut self, constraint: C) -> Self
    where
        C: Constraint + 'static,
    {
        self.constraints.add_inequality(constraint);
        self
    }

    /// Adds an equality constraint, satisfied when `c(x) == 0`.
    pub fn with_equality<C>(mut self, constraint: C) -> Self
    where
        C: Constraint + 'static,
    {
        self.constraints.add_equality(constraint);
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<O>> {
        let objective = self.objective.ok_or_else(|| {
            GeneticError::Configuration("Objective function not specified".to_string())
        })?;

        let bounds = match (self.bounds, self.nvars) {
            (Some((lower, upper)), nvars) => {
                if let Some(nvars) = nvars {
                    if lower.len() != nvars || upper.len() != nvars {
                        return Err(GeneticError::Configuration(format!(
                            "Bounds have {} lower and {} upper entries for {} variables",
                            lower.len(),
                            upper.len(),
                            nvars
                        )));
                    }
                }
                Bounds::new(lower, upper)?
            }
            (None, Some(0)) => {
                return Err(GeneticError::Configuration(
                    "Number of variables must be positive".to_string(),
                ))
            }
            (None, Some(nvars)) => Bounds::unbounded(nvars),
            (None, None) => {
                return Err(GeneticError::Configuration(
                    "Number of variables not specified".to_string(),
                ))
            }
        };

        EvolutionLauncher::new(
            objective,
            bounds,
            self.constraints,
            self.options.unwrap_or_default(),
        )
    }
}

impl<O: Objective> Default for EvolutionLauncherBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}
