use crate::models::FoodCategory;

// ─────────────────────────────────────────────────────────────────────────────
// Nutrient achievement scoring
// ─────────────────────────────────────────────────────────────────────────────

/// Score at the edge of the achievement band.
pub const BAND_SCORE_FLOOR: f64 = 0.8;

/// Score at the band center.
pub const BAND_SCORE_CEIL: f64 = 1.0;

/// Exponential decay rate above the band for excess-penalized nutrients.
pub const EXCESS_DECAY: f64 = 3.0;

/// Exponential decay rate above the band for forgiving nutrients.
pub const GENTLE_DECAY: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Non-nutrient objective weights (nutrient weights come from the bands)
// ─────────────────────────────────────────────────────────────────────────────

pub const PREFERENCE_WEIGHT: f64 = 1.0;
pub const DIVERSITY_WEIGHT: f64 = 0.8;
pub const BALANCE_WEIGHT: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Diversity scoring
// ─────────────────────────────────────────────────────────────────────────────

/// Ideal share of the meal's grams per category. Categories absent here
/// (soup, oil) are welcome but not expected.
pub const IDEAL_CATEGORY_MIX: [(FoodCategory, f64); 5] = [
    (FoodCategory::Staple, 0.30),
    (FoodCategory::Protein, 0.25),
    (FoodCategory::Vegetable, 0.25),
    (FoodCategory::Fruit, 0.10),
    (FoodCategory::Dairy, 0.10),
];

/// Blend weights: category coverage, distribution similarity, attribute
/// variety.
pub const DIVERSITY_COVERAGE_WEIGHT: f64 = 0.4;
pub const DIVERSITY_DISTRIBUTION_WEIGHT: f64 = 0.3;
pub const DIVERSITY_ATTRIBUTE_WEIGHT: f64 = 0.3;

// ─────────────────────────────────────────────────────────────────────────────
// Balance scoring
// ─────────────────────────────────────────────────────────────────────────────

/// Blend weights: macro split closeness, intake-default closeness,
/// calorie closeness.
pub const BALANCE_MACRO_WEIGHT: f64 = 0.4;
pub const BALANCE_INTAKE_WEIGHT: f64 = 0.3;
pub const BALANCE_CALORIE_WEIGHT: f64 = 0.3;

// ─────────────────────────────────────────────────────────────────────────────
// Early termination
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate weighted score a front-1 member must reach for the
/// good-enough check; equals the band floor.
pub const AGGREGATE_SCORE_THRESHOLD: f64 = 0.8;
