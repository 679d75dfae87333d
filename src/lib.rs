pub mod catalog;
pub mod cli;
pub mod error;
pub mod genetics;
pub mod interface;
pub mod models;
pub mod optimizer;
pub mod scoring;

pub use catalog::FoodCatalog;
pub use error::{MealError, Result};
pub use genetics::{Gene, Population, Solution};
pub use models::{FoodCatalogEntry, MealTarget, NutrientVector, UserProfile};
pub use optimizer::{MealOptimizer, OptimizerConfig, ParetoOutcome};
