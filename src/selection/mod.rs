pub mod stochastic_universal;

pub use stochastic_universal::StochasticUniversalSampling;
