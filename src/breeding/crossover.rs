//! # IntermediateCrossover
//!
//! Intermediate-point recombination. One mixing factor `r` is drawn uniformly from `[0, 1]`
//! per pair of parents and the two children are
//!
//! ```text
//! c1 = p1 + r * (p2 - p1)
//! c2 = p2 + r * (p1 - p2)
//! ```
//!
//! Both children lie on the segment between the parents, so they stay inside any box that
//! contains both parents and need no clipping.

use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

#[derive(Debug, Clone, Default)]
pub struct IntermediateCrossover;

impl IntermediateCrossover {
    pub fn new() -> Self {
        Self
    }

    /// Recombines two parents with an explicit mixing factor `r` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Breeding` if the parents differ in length.
    pub fn mix(&self, p1: &[f64], p2: &[f64], r: f64) -> Result<(Vec<f64>, Vec<f64>)> {
        if p1.len() != p2.len() {
            return Err(GeneticError::Breeding(format!(
                "Parents differ in length ({} vs {})",
                p1.len(),
                p2.len()
            )));
        }

        let (c1, c2) = p1
            .iter()
            .zip(p2.iter())
            .map(|(&a, &b)| {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                let (first, second) = if (b - a).is_finite() {
                    (a + r * (b - a), b + r * (a - b))
                } else {
                    // parents further apart than f64::MAX
                    (a * (1.0 - r) + b * r, b * (1.0 - r) + a * r)
                };
                // keep rounding from stepping outside the parents' interval
                (first.clamp(lo, hi), second.clamp(lo, hi))
            })
            .unzip();

        Ok((c1, c2))
    }

    /// Recombines two parents with a freshly drawn mixing factor.
    pub fn crossover(
        &self,
        p1: &[f64],
        p2: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        let r = rng.uniform_inclusive(0.0, 1.0);
        self.mix(p1, p2, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_parents(child: &[f64], p1: &[f64], p2: &[f64]) -> bool {
        child
            .iter()
            .zip(p1.iter().zip(p2.iter()))
            .all(|(&c, (&a, &b))| a.min(b) <= c && c <= a.max(b))
    }

    #[test]
    fn test_mix_endpoints() {
        let crossover = IntermediateCrossover::new();
        let p1 = [0.0, 10.0];
        let p2 = [4.0, -2.0];

        let (c1, c2) = crossover.mix(&p1, &p2, 0.0).unwrap();
        assert_eq!(c1, p1.to_vec());
        assert_eq!(c2, p2.to_vec());

        let (c1, c2) = crossover.mix(&p1, &p2, 1.0).unwrap();
        assert_eq!(c1, p2.to_vec());
        assert_eq!(c2, p1.to_vec());
    }

    #[test]
    fn test_mix_quarter() {
        let crossover = IntermediateCrossover::new();
        let (c1, c2) = crossover.mix(&[0.0, 8.0], &[4.0, 0.0], 0.25).unwrap();
        assert_eq!(c1, vec![1.0, 6.0]);
        assert_eq!(c2, vec![3.0, 2.0]);
    }

    #[test]
    fn test_children_between_parents() {
        let crossover = IntermediateCrossover::new();
        let mut rng = RandomNumberGenerator::from_seed(12);

        for _ in 0..500 {
            let p1: Vec<f64> = rng.fetch_uniform(-1e3, 1e3, 4);
            let p2: Vec<f64> = rng.fetch_uniform(-1e-3, 1e-3, 4);
            let (c1, c2) = crossover.crossover(&p1, &p2, &mut rng).unwrap();

            assert!(within_parents(&c1, &p1, &p2));
            assert!(within_parents(&c2, &p1, &p2));
        }
    }

    #[test]
    fn test_parents_at_opposite_ends_of_f64() {
        let crossover = IntermediateCrossover::new();
        let p1 = [-1e308, 2.0];
        let p2 = [1e308, 4.0];

        let (c1, c2) = crossover.mix(&p1, &p2, 0.5).unwrap();
        assert_eq!(c1, vec![0.0, 3.0]);
        assert_eq!(c2, vec![0.0, 3.0]);

        let (c1, c2) = crossover.mix(&p1, &p2, 0.0).unwrap();
        assert_eq!(c1, p1.to_vec());
        assert_eq!(c2, p2.to_vec());
    }

    #[test]
    fn test_identical_parents() {
        let crossover = IntermediateCrossover::new();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let (c1, c2) = crossover.crossover(&[3.0, 3.0], &[3.0, 3.0], &mut rng).unwrap();
        assert_eq!(c1, vec![3.0, 3.0]);
        assert_eq!(c2, vec![3.0, 3.0]);
    }

    #[test]
    fn test_mismatched_parents() {
        let crossover = IntermediateCrossover::new();
        match crossover.mix(&[1.0], &[1.0, 2.0], 0.5) {
            Err(GeneticError::Breeding(msg)) => assert!(msg.contains("differ in length")),
            _ => panic!("Expected Breeding error"),
        }
    }
}
