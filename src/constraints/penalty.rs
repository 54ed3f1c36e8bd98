//! # Dynamic Penalty
//!
//! Each violated constraint with violation `v` costs `(ii * C)^alpha + v^beta`, where `ii`
//! counts generations since the start of the run or the last cataclysm. The baseline term
//! `(ii * C)^alpha` keeps growing while a run goes on, so infeasible individuals lose ground
//! to feasible ones over time.
//!
//! ```rust
//! use evomin::constraints::{ConstraintSet, PenaltyOptions, PenaltyState};
//!
//! let constraints = ConstraintSet::builder()
//!     .with_inequality(|x: &[f64]| x[0] - 1.0)
//!     .build();
//! let mut state = PenaltyState::new(PenaltyOptions::default());
//!
//! assert_eq!(state.penalty(&[0.0], &constraints), 0.0);
//! assert_eq!(state.penalty(&[3.0], &constraints), 4.0);
//!
//! state.advance();
//! state.advance();
//! // (2 * 1)^2 + 2^2
//! assert_eq!(state.penalty(&[3.0], &constraints), 8.0);
//! ```

use super::ConstraintSet;

/// When the `(ii * C)^alpha` baseline is charged for a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PenaltyBaseline {
    /// Only constraints with a positive violation are charged.
    #[default]
    WhenViolated,
    /// Every constraint is charged, satisfied or not.
    Always,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyOptions {
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub baseline: PenaltyBaseline,
    /// Equality constraints with `|c(x)|` at or below this value count as satisfied.
    pub eq_tolerance: f64,
}

impl Default for PenaltyOptions {
    fn default() -> Self {
        Self {
            c: 1.0,
            alpha: 2.0,
            beta: 2.0,
            baseline: PenaltyBaseline::WhenViolated,
            eq_tolerance: 1e-6,
        }
    }
}

/// Penalty constants plus the generation counter they are evaluated at.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyState {
    options: PenaltyOptions,
    iteration: usize,
}

impl PenaltyState {
    pub fn new(options: PenaltyOptions) -> Self {
        Self {
            options,
            iteration: 0,
        }
    }

    pub fn options(&self) -> &PenaltyOptions {
        &self.options
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn advance(&mut self) {
        self.iteration += 1;
    }

    pub fn reset(&mut self) {
        self.iteration = 0;
    }

    /// The `(ii * C)^alpha` term at the current iteration.
    pub fn baseline(&self) -> f64 {
        (self.iteration as f64 * self.options.c).powf(self.options.alpha)
    }

    /// Total non-negative penalty of `x` against `constraints`.
    pub fn penalty(&self, x: &[f64], constraints: &ConstraintSet) -> f64 {
        if constraints.is_empty() {
            return 0.0;
        }
        self.penalty_for(&constraints.violations(x, self.options.eq_tolerance))
    }

    /// Penalty for already computed violation amounts, one per constraint. NaN amounts make
    /// the penalty NaN.
    pub fn penalty_for(&self, violations: &[f64]) -> f64 {
        let baseline = self.baseline();
        violations
            .iter()
            .map(|&v| match (self.options.baseline, v > 0.0) {
                _ if v.is_nan() => f64::NAN,
                (_, true) => baseline + v.powf(self.options.beta),
                (PenaltyBaseline::Always, false) => baseline,
                (PenaltyBaseline::WhenViolated, false) => 0.0,
            })
            .sum()
    }
}
