pub mod balance;
pub mod constants;
pub mod diversity;
pub mod evaluator;
pub mod nutrient;
pub mod preference;

pub use balance::balance_score;
pub use diversity::diversity_score;
pub use evaluator::{MultiObjectiveEvaluator, Objective};
pub use nutrient::{score_actual, score_ratio};
pub use preference::{preference_score, PreferenceFactors};
