use serde::{Deserialize, Serialize};

use crate::models::nutrient::NutrientVector;

/// Allowed intake window for one food, in grams.
///
/// Invariant: min ≤ default ≤ max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRange {
    pub min_g: u32,
    pub max_g: u32,
    pub default_g: u32,
}

impl IntakeRange {
    pub const fn new(min_g: u32, max_g: u32, default_g: u32) -> Self {
        assert!(min_g <= default_g && default_g <= max_g);
        Self {
            min_g,
            max_g,
            default_g,
        }
    }

    pub fn contains(&self, grams: u32) -> bool {
        (self.min_g..=self.max_g).contains(&grams)
    }

    pub fn clamp(&self, grams: i64) -> u32 {
        grams.clamp(self.min_g as i64, self.max_g as i64) as u32
    }

    pub fn span(&self) -> u32 {
        self.max_g - self.min_g
    }
}

/// Category of a food; determines its allowed intake range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodCategory {
    Staple,
    Protein,
    Vegetable,
    Fruit,
    Dairy,
    Soup,
    Oil,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Staple,
        FoodCategory::Protein,
        FoodCategory::Vegetable,
        FoodCategory::Fruit,
        FoodCategory::Dairy,
        FoodCategory::Soup,
        FoodCategory::Oil,
    ];

    /// Intake window for foods of this category.
    pub fn intake_range(&self) -> IntakeRange {
        match self {
            FoodCategory::Staple => IntakeRange::new(100, 400, 250),
            FoodCategory::Protein => IntakeRange::new(50, 300, 150),
            FoodCategory::Vegetable => IntakeRange::new(50, 300, 150),
            FoodCategory::Fruit => IntakeRange::new(50, 250, 120),
            FoodCategory::Dairy => IntakeRange::new(100, 400, 200),
            FoodCategory::Soup => IntakeRange::new(150, 500, 300),
            FoodCategory::Oil => IntakeRange::new(5, 40, 15),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FoodCategory::Staple => "staple",
            FoodCategory::Protein => "protein",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Fruit => "fruit",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Soup => "soup",
            FoodCategory::Oil => "oil",
        }
    }
}

/// Preference-relevant attributes of a food.
///
/// Consumed only by the preference and diversity scorers; the nutrient
/// objectives never look at tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodTags {
    /// Allergen labels, e.g. "peanut", "shellfish".
    #[serde(rename = "Allergens", default)]
    pub allergens: Vec<String>,

    /// Religious restriction labels, e.g. "pork", "beef".
    #[serde(rename = "Religious", default)]
    pub religious: Vec<String>,

    /// Flavor labels, e.g. "sweet", "umami".
    #[serde(rename = "Flavors", default)]
    pub flavors: Vec<String>,

    /// Heat level on a 0 (none) to 4 (extreme) scale.
    #[serde(rename = "SpiceLevel", default)]
    pub spice_level: u8,

    /// Preparation label, e.g. "steamed", "fried".
    #[serde(rename = "CookingMethod", default)]
    pub cooking_method: String,
}

/// An immutable food catalog entry.
///
/// Nutrients are per 100 g of the food as served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCatalogEntry {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Category")]
    pub category: FoodCategory,

    #[serde(rename = "Nutrients")]
    pub per_100g: NutrientVector,

    #[serde(rename = "Tags", default)]
    pub tags: FoodTags,
}

impl FoodCatalogEntry {
    /// Nutrient totals for a given intake in grams.
    pub fn nutrients_for(&self, grams: u32) -> NutrientVector {
        self.per_100g.scale(grams as f64 / 100.0)
    }

    /// Calories per gram of this food.
    pub fn calories_per_gram(&self) -> f64 {
        self.per_100g.calories / 100.0
    }

    /// Allowed intake window, from the category.
    pub fn intake_range(&self) -> IntakeRange {
        self.category.intake_range()
    }

    pub fn is_staple(&self) -> bool {
        self.category == FoodCategory::Staple
    }

    /// Basic validation: non-negative nutrients and a spice level on scale.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.per_100g.is_valid() && self.tags.spice_level <= 4
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for FoodCatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Eq for FoodCatalogEntry {}

impl std::hash::Hash for FoodCatalogEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}
