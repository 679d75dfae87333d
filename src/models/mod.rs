pub mod food;
pub mod nutrient;
pub mod profile;

pub use food::{FoodCatalogEntry, FoodCategory, FoodTags, IntakeRange};
pub use nutrient::{Nutrient, NutrientVector};
pub use profile::{AchievementBand, MacroSplit, MealTarget, NutrientBands, UserProfile};
