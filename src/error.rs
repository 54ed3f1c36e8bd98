//! # Error Types
//!
//! This module defines the error type shared by every part of the solver. Invalid
//! configuration is rejected up front when a launcher is built; once a run has started
//! the only failures are unusable fitness values or internal sampling problems.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evomin::error::{GeneticError, Result};
//!
//! fn check_population(size: usize) -> Result<()> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Population size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_population(0).is_err());
//! assert!(check_population(10).is_ok());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use evomin::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[f64]) -> evomin::error::Result<f64> {
//!     scores
//!         .iter()
//!         .cloned()
//!         .reduce(f64::min)
//!         .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_score(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! assert!(best_score(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the solver.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a fitness calculation produces an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when parent selection fails.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Error that occurs when a breeding operation fails.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when a random number generation fails.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),
}

/// A specialized Result type for solver operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
