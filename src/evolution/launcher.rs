use tracing::{debug, info};

use super::{
    builder::EvolutionLauncherBuilder,
    cataclysm::Cataclysm,
    evaluator::FitnessEvaluator,
    objective::Objective,
    options::EvolutionOptions,
    stall::{StallDetector, StallPhase},
};
use crate::{
    bounds::Bounds,
    breeding::{Breeder, GaussianMutation, OffspringPlan},
    constraints::{ConstraintSet, PenaltyState},
    error::{GeneticError, OptionExt, Result},
    individual::{Individual, Population},
    rng::RandomNumberGenerator,
};

/// Represents the result of an evolution: the best individual ever seen and a trace of
/// the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionResult {
    /// Best individual across all generations, compared with
    /// [`Individual::cmp_feasibility`].
    pub best: Individual,
    /// Number of generations run.
    pub generations: usize,
    /// Number of cataclysms triggered.
    pub cataclysms: usize,
    /// Best fitness of every generation.
    pub history: Vec<f64>,
}

impl EvolutionResult {
    /// Splits into `(best_vector, best_score)`, where the score is the raw objective value.
    pub fn into_parts(self) -> (Vec<f64>, f64) {
        let score = self.best.score();
        (self.best.into_genes(), score)
    }
}

/// What happened in one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_fitness: f64,
    /// Sigma the generation's mutation children were drawn with.
    pub sigma: f64,
    /// Size of the population handed to the next generation.
    pub population_size: usize,
    pub cataclysm: bool,
}

/// Minimizes an objective over a box, subject to inequality and equality constraints.
///
/// Built through [`EvolutionLauncher::builder`]. A launcher is immutable; every call to
/// [`run`](Self::run) starts a fresh search.
///
/// # Examples
///
/// ```
/// use evomin::evolution::{EvolutionLauncher, EvolutionOptions};
///
/// let launcher = EvolutionLauncher::builder()
///     .with_objective(|x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 1.0).powi(2))
///     .with_nvars(2)
///     .with_options(EvolutionOptions::builder().seed(7).build())
///     .build()
///     .unwrap();
///
/// let (best, score) = launcher.run().unwrap().into_parts();
/// assert_eq!(best.len(), 2);
/// assert!(score < 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<O: Objective> {
    objective: O,
    bounds: Bounds,
    constraints: ConstraintSet,
    options: EvolutionOptions,
}

impl<O: Objective> EvolutionLauncher<O> {
    pub fn builder() -> EvolutionLauncherBuilder<O> {
        EvolutionLauncherBuilder::new()
    }

    /// Creates a launcher from already validated parts.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the options are invalid.
    pub fn new(
        objective: O,
        bounds: Bounds,
        constraints: ConstraintSet,
        options: EvolutionOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            objective,
            bounds,
            constraints,
            options,
        })
    }

    pub fn nvars(&self) -> usize {
        self.bounds.nvars()
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Runs the full generation budget with a generator seeded from the options, or from
    /// system entropy when no seed is set.
    pub fn run(&self) -> Result<EvolutionResult> {
        let mut rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs the full generation budget drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessCalculation` if the objective produces NaN.
    pub fn run_with_rng(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        let mut evolution = self.start(rng);
        let mut history = Vec::with_capacity(self.options.get_num_generations());

        for _ in 0..self.options.get_num_generations() {
            let report = evolution.step(rng)?;
            history.push(report.best_fitness);
        }

        let cataclysms = evolution.cataclysms();
        let best = evolution.into_best()?;

        info!(
            generations = history.len(),
            cataclysms,
            best_fitness = best.fitness(),
            best_score = best.score(),
            "evolution finished"
        );

        Ok(EvolutionResult {
            best,
            generations: history.len(),
            cataclysms,
            history,
        })
    }

    /// Samples an initial population and returns the generation-by-generation driver.
    pub fn start(&self, rng: &mut RandomNumberGenerator) -> Evolution<'_, O> {
        let population_size = self.options.get_population_size();
        let population = (0..population_size)
            .map(|_| self.bounds.sample(rng))
            .collect();

        let plan = OffspringPlan::new(
            population_size,
            self.options.get_elites(),
            self.options.get_crossover_rate(),
        );
        let mutation = GaussianMutation::new(
            self.options.get_mutation().clone(),
            self.options.get_num_generations(),
        );

        Evolution {
            launcher: self,
            population,
            generation: 0,
            penalty: PenaltyState::new(self.options.get_penalty().clone()),
            mutation_clock: 0,
            stall: StallDetector::new(self.options.get_stall().clone()),
            breeder: Breeder::new(plan, mutation),
            cataclysm: Cataclysm::new(self.options.get_survivors()),
            cataclysms: 0,
            best: None,
        }
    }
}

/// A search in progress, advanced one generation at a time with [`step`](Self::step).
#[derive(Debug)]
pub struct Evolution<'a, O: Objective> {
    launcher: &'a EvolutionLauncher<O>,
    /// Unscored vectors of the upcoming generation.
    population: Vec<Vec<f64>>,
    generation: usize,
    penalty: PenaltyState,
    /// Generations since the start or the last cataclysm; drives the sigma schedule.
    mutation_clock: usize,
    stall: StallDetector,
    breeder: Breeder,
    cataclysm: Cataclysm,
    cataclysms: usize,
    best: Option<Individual>,
}

impl<'a, O: Objective> Evolution<'a, O> {
    pub fn population(&self) -> &[Vec<f64>] {
        &self.population
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn penalty_iteration(&self) -> usize {
        self.penalty.iteration()
    }

    pub fn mutation_clock(&self) -> usize {
        self.mutation_clock
    }

    pub fn sigma(&self) -> f64 {
        self.breeder.mutation().sigma_at(self.mutation_clock)
    }

    pub fn stall_phase(&self) -> StallPhase {
        self.stall.phase()
    }

    pub fn cataclysms(&self) -> usize {
        self.cataclysms
    }

    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Result<Individual> {
        self.best.ok_or_else_genetic(|| {
            GeneticError::Evolution("No generation has been evaluated yet".to_string())
        })
    }

    /// Runs one generation: evaluate, rank, then either breed the next population or, if the
    /// search stalled, replace it through a cataclysm.
    pub fn step(&mut self, rng: &mut RandomNumberGenerator) -> Result<GenerationReport> {
        let launcher = self.launcher;
        let evaluator = FitnessEvaluator::new(&launcher.objective, &launcher.constraints);

        let current = std::mem::take(&mut self.population);
        let ranked = Population::ranked(evaluator.evaluate_all(current, &self.penalty)?)?;

        // fitness is only comparable within a generation, the penalty grows with ii
        let candidate = ranked.most_feasible();
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| candidate.cmp_feasibility(best).is_lt());
        if improved {
            self.best = Some(candidate.clone());
        }

        let generation_best = ranked.best();
        let sigma = self.sigma();
        let population_size = launcher.options.get_population_size();
        // stall is judged on the raw score of the top-ranked individual
        let stalled = self.stall.record(generation_best.score());

        let next = if stalled {
            let next = self
                .cataclysm
                .strike(&ranked, population_size, &launcher.bounds, rng);
            self.penalty.reset();
            self.mutation_clock = 0;
            self.stall.reset();
            self.cataclysms += 1;
            next
        } else {
            let next = self.breeder.breed(&ranked, sigma, &launcher.bounds, rng)?;
            self.penalty.advance();
            self.mutation_clock += 1;
            next
        };

        if next.len() != population_size {
            return Err(GeneticError::Evolution(format!(
                "Generation {} produced {} individuals instead of {}",
                self.generation,
                next.len(),
                population_size
            )));
        }

        debug!(
            generation = self.generation,
            best_fitness = generation_best.fitness(),
            best_score = generation_best.score(),
            sigma,
            penalty_iteration = self.penalty.iteration(),
            cataclysm = stalled,
            "generation complete"
        );

        let report = GenerationReport {
            generation: self.generation,
            best_fitness: generation_best.fitness(),
            sigma,
            population_size: next.len(),
            cataclysm: stalled,
        };

        self.population = next;
        self.generation += 1;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::PenaltyOptions;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn launcher(options: EvolutionOptions) -> EvolutionLauncher<fn(&[f64]) -> f64> {
        EvolutionLauncher::new(
            sphere as fn(&[f64]) -> f64,
            Bounds::new(vec![-5.0; 3], vec![5.0; 3]).unwrap(),
            ConstraintSet::new(),
            options,
        )
        .unwrap()
    }

    #[test]
    fn test_population_size_is_constant() {
        let launcher = launcher(EvolutionOptions::builder().population_size(21).build());
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut evolution = launcher.start(&mut rng);

        assert_eq!(evolution.population().len(), 21);
        for _ in 0..60 {
            let report = evolution.step(&mut rng).unwrap();
            assert_eq!(report.population_size, 21);
            assert_eq!(evolution.population().len(), 21);
            assert!(evolution
                .population()
                .iter()
                .all(|x| launcher.bounds().contains(x)));
        }
    }

    #[test]
    fn test_counters_reset_on_cataclysm() {
        // a flat objective stalls as soon as the window is full
        let launcher = EvolutionLauncher::new(
            |_: &[f64]| 1.0,
            Bounds::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap(),
            ConstraintSet::new(),
            EvolutionOptions::builder()
                .population_size(10)
                .stall(0.01, 3)
                .survivors(0.3)
                .build(),
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut evolution = launcher.start(&mut rng);

        for expected in 1..=2 {
            let report = evolution.step(&mut rng).unwrap();
            assert!(!report.cataclysm);
            assert_eq!(evolution.penalty_iteration(), expected);
            assert_eq!(evolution.mutation_clock(), expected);
        }

        let report = evolution.step(&mut rng).unwrap();
        assert!(report.cataclysm);
        assert_eq!(evolution.penalty_iteration(), 0);
        assert_eq!(evolution.mutation_clock(), 0);
        assert_eq!(evolution.stall_phase(), StallPhase::JustCataclysmed);
        assert_eq!(evolution.sigma(), 1.0);
        assert_eq!(evolution.population().len(), 10);
        assert_eq!(evolution.cataclysms(), 1);

        let report = evolution.step(&mut rng).unwrap();
        assert!(!report.cataclysm);
        assert_eq!(evolution.stall_phase(), StallPhase::Evolving);
        assert_eq!(evolution.penalty_iteration(), 1);
    }

    #[test]
    fn test_sigma_follows_schedule_between_cataclysms() {
        let launcher = launcher(
            EvolutionOptions::builder()
                .num_generations(20)
                .mutation(1.0, 2.0)
                .stall(-1.0, 50)
                .build(),
        );
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut evolution = launcher.start(&mut rng);

        let mut previous = f64::INFINITY;
        for k in 0..20 {
            let report = evolution.step(&mut rng).unwrap();
            assert_eq!(report.sigma, 2.0 * (1.0 - k as f64 / 20.0).max(1e-3));
            assert!(report.sigma <= previous);
            previous = report.sigma;
        }
    }

    #[test]
    fn test_best_is_never_forgotten() {
        let launcher = launcher(EvolutionOptions::builder().seed(4).build());
        let result = launcher.run().unwrap();

        let best_in_history = result
            .history
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best.fitness(), best_in_history);
        assert_eq!(result.generations, 100);
        assert_eq!(result.history.len(), 100);
    }

    #[test]
    fn test_best_ever_prefers_feasible_points() {
        // with this penalty an infeasible x = 9 has fitness -9 + sqrt(8), far below any
        // feasible fitness
        let launcher = EvolutionLauncher::new(
            |x: &[f64]| -x[0],
            Bounds::new(vec![0.0], vec![10.0]).unwrap(),
            ConstraintSet::builder()
                .with_inequality(|x: &[f64]| x[0] - 1.0)
                .build(),
            EvolutionOptions::builder()
                .num_generations(60)
                .penalty(PenaltyOptions {
                    c: 0.0,
                    alpha: 1.0,
                    beta: 0.5,
                    ..PenaltyOptions::default()
                })
                .seed(10)
                .build(),
        )
        .unwrap();

        let result = launcher.run().unwrap();

        assert!(result.best.is_feasible());
        assert!(result.best.genes()[0] <= 1.0);
        assert!(result.history.iter().any(|&h| h < result.best.fitness()));
    }

    #[test]
    fn test_into_best_before_any_step() {
        let launcher = launcher(EvolutionOptions::default());
        let mut rng = RandomNumberGenerator::from_seed(5);
        let evolution = launcher.start(&mut rng);
        assert!(evolution.best().is_none());
        match evolution.into_best() {
            Err(GeneticError::Evolution(_)) => (),
            _ => panic!("Expected Evolution error"),
        }
    }

    #[test]
    fn test_penalty_iteration_reaches_evaluator() {
        let launcher = EvolutionLauncher::new(
            |x: &[f64]| x[0],
            Bounds::new(vec![1.0], vec![2.0]).unwrap(),
            ConstraintSet::builder()
                .with_inequality(|x: &[f64]| x[0])
                .build(),
            EvolutionOptions::builder()
                .population_size(4)
                .stall(-1.0, 50)
                .penalty(PenaltyOptions {
                    beta: 1.0,
                    ..PenaltyOptions::default()
                })
                .build(),
        )
        .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(6);
        let mut evolution = launcher.start(&mut rng);

        // every vector violates x <= 0 by x, so fitness = x + ii^2 + x
        for ii in 0..5 {
            let report = evolution.step(&mut rng).unwrap();
            let x = report.best_fitness - (ii * ii) as f64;
            assert!((2.0..=4.0).contains(&x), "ii = {}, fitness = {}", ii, report.best_fitness);
        }
    }
}
