//! # Constraints Module
//!
//! Inequality and equality constraints on the decision vector, and the dynamic penalty that
//! turns their violation into a fitness cost.
//!
//! ## Overview
//!
//! - `Constraint` trait: a scalar function of the decision vector
//! - `ConstraintKind`: inequality constraints are satisfied when `c(x) <= 0`, equality
//!   constraints when `|c(x)|` is within the equality tolerance
//! - `ConstraintViolation`: a single violated constraint and by how much
//! - `ConstraintSet`: the ordered inequality and equality lists of a problem
//! - `penalty`: the iteration-dependent penalty built on top of a `ConstraintSet`
//!
//! ## Basic Usage
//!
//! ```rust
//! use evomin::constraints::{ConstraintKind, ConstraintSet};
//!
//! let constraints = ConstraintSet::builder()
//!     .with_inequality(|x: &[f64]| x[0] - 1.0)
//!     .with_equality(|x: &[f64]| x[0] + x[1] - 6.0)
//!     .build();
//!
//! assert!(constraints.is_feasible(&[1.0, 5.0], 1e-6));
//!
//! let violations = constraints.check_all(&[2.0, 2.0], 1e-6);
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].kind(), ConstraintKind::Inequality);
//! assert_eq!(violations[1].amount(), 2.0);
//! ```

use std::fmt::{Debug, Display};
use std::sync::Arc;

pub mod penalty;

pub use penalty::{PenaltyBaseline, PenaltyOptions, PenaltyState};

/// A scalar function of the decision vector.
///
/// Any closure `Fn(&[f64]) -> f64 + Send + Sync` is a constraint.
pub trait Constraint: Send + Sync {
    fn value(&self, x: &[f64]) -> f64;
}

impl<F> Constraint for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn value(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Satisfied when `c(x) <= 0`.
    Inequality,
    /// Satisfied when `c(x) == 0` within tolerance.
    Equality,
}

impl ConstraintKind {
    /// Violation amount for a raw constraint value; zero when satisfied.
    ///
    /// A NaN value is neither satisfied nor violated by a known amount and comes back as NaN.
    pub fn violation(&self, value: f64, eq_tolerance: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        match self {
            ConstraintKind::Inequality => value.max(0.0),
            ConstraintKind::Equality => {
                if value.abs() > eq_tolerance {
                    value.abs()
                } else {
                    0.0
                }
            }
        }
    }
}

/// Represents a violation of a constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    kind: ConstraintKind,
    /// Position of the constraint within its own list.
    index: usize,
    amount: f64,
}

impl ConstraintViolation {
    pub fn new(kind: ConstraintKind, index: usize, amount: f64) -> Self {
        Self {
            kind,
            index,
            amount,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the violation amount: positive, or NaN if the constraint evaluated to NaN.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            ConstraintKind::Inequality => "inequality",
            ConstraintKind::Equality => "equality",
        };
        write!(
            f,
            "Constraint '{} #{}' violated by {}",
            kind, self.index, self.amount
        )
    }
}

/// The ordered inequality and equality constraints of a problem.
#[derive(Clone, Default)]
pub struct ConstraintSet {
    inequalities: Vec<Arc<dyn Constraint>>,
    equalities: Vec<Arc<dyn Constraint>>,
}

impl ConstraintSet {
    /// Creates a new empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new constraint set builder.
    pub fn builder() -> ConstraintSetBuilder {
        ConstraintSetBuilder::new()
    }

    /// Adds an inequality constraint, satisfied when `c(x) <= 0`.
    pub fn add_inequality<C>(&mut self, constraint: C) -> &mut Self
    where
        C: Constraint + 'static,
    {
        self.inequalities.push(Arc::new(constraint));
        self
    }

    /// Adds an equality constraint, satisfied when `c(x) == 0`.
    pub fn add_equality<C>(&mut self, constraint: C) -> &mut Self
    where
        C: Constraint + 'static,
    {
        self.equalities.push(Arc::new(constraint));
        self
    }

    /// Iterates over every constraint in order: inequalities first, then equalities.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintKind, usize, &dyn Constraint)> + '_ {
        let inequalities = self
            .inequalities
            .iter()
            .enumerate()
            .map(|(i, c)| (ConstraintKind::Inequality, i, c.as_ref()));
        let equalities = self
            .equalities
            .iter()
            .enumerate()
            .map(|(i, c)| (ConstraintKind::Equality, i, c.as_ref()));
        inequalities.chain(equalities)
    }

    /// Returns the violation amount of every constraint, in `iter` order.
    pub fn violations(&self, x: &[f64], eq_tolerance: f64) -> Vec<f64> {
        self.iter()
            .map(|(kind, _, c)| kind.violation(c.value(x), eq_tolerance))
            .collect()
    }

    /// Lists the violated constraints of `x`, including those that evaluated to NaN. An
    /// empty vector means `x` is feasible.
    pub fn check_all(&self, x: &[f64], eq_tolerance: f64) -> Vec<ConstraintViolation> {
        self.iter()
            .filter_map(|(kind, index, c)| {
                let amount = kind.violation(c.value(x), eq_tolerance);
                (amount != 0.0).then(|| ConstraintViolation::new(kind, index, amount))
            })
            .collect()
    }

    /// Checks if `x` satisfies all constraints.
    pub fn is_feasible(&self, x: &[f64], eq_tolerance: f64) -> bool {
        self.check_all(x, eq_tolerance).is_empty()
    }

    pub fn num_inequalities(&self) -> usize {
        self.inequalities.len()
    }

    pub fn num_equalities(&self) -> usize {
        self.equalities.len()
    }

    /// Returns the number of constraints in the set.
    pub fn len(&self) -> usize {
        self.inequalities.len() + self.equalities.len()
    }

    /// Returns `true` if the set has no constraints.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for ConstraintSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("inequalities", &self.inequalities.len())
            .field("equalities", &self.equalities.len())
            .finish()
    }
}

/// Builder for creating a constraint set with a fluent API.
#[derive(Default)]
pub struct ConstraintSetBuilder {
    set: ConstraintSet,
}

impl ConstraintSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inequality<C>(mut self, constraint: C) -> Self
    where
        C: Constraint + 'static,
    {
        self.set.add_inequality(constraint);
        self
    }

    pub fn with_equality<C>(mut self, constraint: C) -> Self
    where
        C: Constraint + 'static,
    {
        self.set.add_equality(constraint);
        self
    }

    pub fn build(self) -> ConstraintSet {
        self.set
    }
}
