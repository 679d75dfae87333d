pub mod config;
pub mod engine;
pub mod outcome;

pub use config::OptimizerConfig;
pub use engine::{MealOptimizer, OptimizerRun};
pub use outcome::{all_bands_satisfied, extract_outcome, weighted_deviation, ParetoOutcome};
