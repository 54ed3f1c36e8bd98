pub mod builder;
pub mod cataclysm;
pub mod evaluator;
pub mod launcher;
pub mod objective;
pub mod options;
pub mod stall;

pub use builder::EvolutionLauncherBuilder;
pub use cataclysm::Cataclysm;
pub use evaluator::FitnessEvaluator;
pub use launcher::{Evolution, EvolutionLauncher, EvolutionResult, GenerationReport};
pub use objective::Objective;
pub use options::{EvolutionOptions, EvolutionOptionsBuilder};
pub use stall::{StallDetector, StallOptions, StallPhase};
