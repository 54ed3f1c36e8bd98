//! # Stall Detection
//!
//! Keeps the best raw score of the last `generations` generations and reports a stall when the
//! mean improvement between consecutive entries drops to `tolerance` or below. Improvement
//! is `previous_best - current_best`, so with minimization a positive value is progress.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StallOptions {
    pub tolerance: f64,
    /// Length of the history window; at least 2.
    pub generations: usize,
}

impl Default for StallOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            generations: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallPhase {
    Evolving,
    /// The generation right after a cataclysm.
    JustCataclysmed,
}

#[derive(Debug, Clone)]
pub struct StallDetector {
    options: StallOptions,
    history: VecDeque<f64>,
    phase: StallPhase,
}

impl StallDetector {
    pub fn new(options: StallOptions) -> Self {
        let capacity = options.generations;
        Self {
            options,
            history: VecDeque::with_capacity(capacity),
            phase: StallPhase::Evolving,
        }
    }

    pub fn phase(&self) -> StallPhase {
        self.phase
    }

    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    /// Mean improvement across the window, or `None` until the window is full.
    pub fn mean_improvement(&self) -> Option<f64> {
        if self.history.len() < self.options.generations || self.history.len() < 2 {
            return None;
        }

        let total: f64 = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .map(|(previous, current)| previous - current)
            .sum();
        Some(total / (self.history.len() - 1) as f64)
    }

    /// Records the best score of a generation and returns `true` if the search stalled.
    pub fn record(&mut self, best: f64) -> bool {
        self.phase = StallPhase::Evolving;

        self.history.push_back(best);
        while self.history.len() > self.options.generations {
            self.history.pop_front();
        }

        match self.mean_improvement() {
            Some(improvement) => improvement <= self.options.tolerance,
            None => false,
        }
    }

    /// Clears the window after a cataclysm.
    pub fn reset(&mut self) {
        self.history.clear();
        self.phase = StallPhase::JustCataclysmed;
    }
}
