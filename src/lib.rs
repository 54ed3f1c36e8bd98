//! # evomin
//!
//! Minimizes a real-valued objective over a box, subject to inequality and equality
//! constraints, with a genetic algorithm built from:
//!
//! - rank-scaled stochastic universal sampling,
//! - intermediate-point crossover,
//! - gaussian mutation with a shrinking spread,
//! - a dynamic penalty that tightens every generation,
//! - elitism, and a cataclysm that partially restarts a stalled population.
//!
//! ```rust
//! use evomin::evolution::{EvolutionLauncher, EvolutionOptions};
//!
//! let launcher = EvolutionLauncher::builder()
//!     .with_objective(|x: &[f64]| x[0] * x[1])
//!     .with_bounds(vec![0.0, 0.0], vec![10.0, 10.0])
//!     .with_equality(|x: &[f64]| x[0] + x[1] - 6.0)
//!     .with_options(EvolutionOptions::builder().seed(1).build())
//!     .build()
//!     .unwrap();
//!
//! let result = launcher.run().unwrap();
//! assert_eq!(result.best.genes().len(), 2);
//! ```

pub mod bounds;
pub mod breeding;
pub mod constraints;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use bounds::Bounds;
pub use constraints::ConstraintSet;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, Objective};
pub use individual::{Individual, Population};
pub use rng::RandomNumberGenerator;
