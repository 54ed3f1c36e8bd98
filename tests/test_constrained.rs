use evomin::{
    constraints::{ConstraintSet, PenaltyBaseline, PenaltyOptions},
    error::GeneticError,
    evolution::{EvolutionLauncher, EvolutionOptions},
};

#[test]
fn test_equality_constrained_product() {
    // without the constraint the product is unbounded below in every direction
    let launcher = EvolutionLauncher::builder()
        .with_objective(|x: &[f64]| x[0] * x[1])
        .with_nvars(2)
        .with_equality(|x: &[f64]| x[0] + x[1] - 6.0)
        .with_options(
            EvolutionOptions::builder()
                .num_generations(300)
                .seed(11)
                .build(),
        )
        .build()
        .unwrap();

    let result = launcher.run().unwrap();
    let x = result.best.genes();

    assert!(
        (x[0] + x[1] - 6.0).abs() < 1e-2,
        "constraint residual too large at {:?}",
        x
    );
}

#[test]
fn test_binding_inequality() {
    // minimize (x - 3)^2 subject to x <= 1
    let launcher = EvolutionLauncher::builder()
        .with_objective(|x: &[f64]| (x[0] - 3.0).powi(2))
        .with_bounds(vec![-10.0], vec![10.0])
        .with_inequality(|x: &[f64]| x[0] - 1.0)
        .with_options(EvolutionOptions::builder().seed(5).build())
        .build()
        .unwrap();

    let result = launcher.run().unwrap();
    let x = result.best.genes()[0];

    assert!(result.best.is_feasible());
    assert!(x <= 1.0, "x = {}", x);
    assert!(x > 0.99, "x = {}", x);
}

#[test]
fn test_nan_constraint_fails_the_run() {
    let launcher = EvolutionLauncher::builder()
        .with_objective(|x: &[f64]| x[0])
        .with_bounds(vec![0.0], vec![1.0])
        .with_inequality(|x: &[f64]| if x[0] > 0.5 { f64::NAN } else { -1.0 })
        .with_options(EvolutionOptions::builder().seed(2).build())
        .build()
        .unwrap();

    match launcher.run() {
        Err(GeneticError::FitnessCalculation(msg)) => assert!(msg.contains("constraint")),
        other => panic!("Expected FitnessCalculation error, got {:?}", other),
    }
}

#[test]
fn test_inactive_inequality_leaves_optimum_alone() {
    // minimize (x - 3)^2 subject to x <= 5
    let launcher = EvolutionLauncher::builder()
        .with_objective(|x: &[f64]| (x[0] - 3.0).powi(2))
        .with_bounds(vec![-10.0], vec![10.0])
        .with_inequality(|x: &[f64]| x[0] - 5.0)
        .with_options(EvolutionOptions::builder().seed(5).build())
        .build()
        .unwrap();

    let result = launcher.run().unwrap();
    let x = result.best.genes()[0];

    assert!((x - 3.0).abs() < 1e-2, "x = {}", x);
    assert_eq!(result.best.penalty(), 0.0);
}

#[test]
fn test_always_baseline_charges_feasible_points() {
    let constraints = ConstraintSet::builder()
        .with_inequality(|x: &[f64]| x[0] - 100.0)
        .build();

    let launcher = EvolutionLauncher::builder()
        .with_objective(|x: &[f64]| x[0] * x[0])
        .with_bounds(vec![-1.0], vec![1.0])
        .with_constraints(constraints)
        .with_options(
            EvolutionOptions::builder()
                .num_generations(10)
                .penalty(PenaltyOptions {
                    baseline: PenaltyBaseline::Always,
                    ..PenaltyOptions::default()
                })
                .seed(8)
                .build(),
        )
        .build()
        .unwrap();

    let result = launcher.run().unwrap();

    // every point is feasible, so the penalty is exactly the baseline of its generation
    let penalty = result.best.penalty();
    let ii = penalty.sqrt();
    assert!((ii - ii.round()).abs() < 1e-9, "penalty {} is not a square", penalty);
    assert!(launcher.constraints().is_feasible(result.best.genes(), 1e-6));
}
