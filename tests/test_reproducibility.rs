use evomin::{
    evolution::{EvolutionLauncher, EvolutionOptions},
    rng::RandomNumberGenerator,
};

fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

#[test]
fn test_same_seed_same_result() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let launcher = EvolutionLauncher::builder()
        .with_objective(rosenbrock)
        .with_bounds(vec![-2.0; 3], vec![2.0; 3])
        .with_inequality(|x: &[f64]| x[0] + x[1] + x[2] - 2.5)
        .with_options(
            EvolutionOptions::builder()
                .num_generations(40)
                .seed(2718)
                .build(),
        )
        .build()
        .unwrap();

    let first = launcher.run().unwrap();
    let second = launcher.run().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_injected_rng_matches_seeded_run() {
    let launcher = EvolutionLauncher::builder()
        .with_objective(rosenbrock)
        .with_nvars(2)
        .with_options(EvolutionOptions::builder().num_generations(25).seed(99).build())
        .build()
        .unwrap();

    let seeded = launcher.run().unwrap();
    let injected = launcher
        .run_with_rng(&mut RandomNumberGenerator::from_seed(99))
        .unwrap();

    assert_eq!(seeded, injected);
}

#[test]
fn test_different_seeds_diverge() {
    let build = |seed| {
        EvolutionLauncher::builder()
            .with_objective(rosenbrock)
            .with_nvars(2)
            .with_options(EvolutionOptions::builder().num_generations(5).seed(seed).build())
            .build()
            .unwrap()
    };

    let a = build(1).run().unwrap();
    let b = build(2).run().unwrap();

    assert_ne!(a.history, b.history);
}

#[cfg(feature = "serde")]
#[test]
fn test_result_and_options_serialize() {
    let options = EvolutionOptions::builder().population_size(12).seed(3).build();
    let json = serde_json::to_string(&options).unwrap();
    let restored: EvolutionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(options, restored);

    let launcher = EvolutionLauncher::builder()
        .with_objective(rosenbrock)
        .with_nvars(2)
        .with_options(restored)
        .build()
        .unwrap();
    let result = launcher.run().unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let restored: evomin::EvolutionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result.best.genes(), restored.best.genes());
    assert_eq!(result.generations, restored.generations);
}
