use serde::{Deserialize, Serialize};

use crate::models::nutrient::{Nutrient, NutrientVector};

/// Who the meal is for: restrictions and likes that feed the preference
/// scorer, plus health-condition labels carried for display.
///
/// The nutritional meaning of a health condition arrives separately as
/// pre-computed [`NutrientBands`] and a [`MacroSplit`]; this type never
/// encodes condition rules itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "Allergens", default)]
    pub allergens: Vec<String>,

    #[serde(rename = "ReligiousRestrictions", default)]
    pub religious_restrictions: Vec<String>,

    /// Disliked food names; matched fuzzily against the catalog.
    #[serde(rename = "Dislikes", default)]
    pub dislikes: Vec<String>,

    /// Highest tolerated spice level, 0–4.
    #[serde(rename = "SpiceTolerance", default = "default_spice_tolerance")]
    pub spice_tolerance: u8,

    #[serde(rename = "FlavorLikes", default)]
    pub flavor_likes: Vec<String>,

    #[serde(rename = "HealthConditions", default)]
    pub health_conditions: Vec<String>,
}

fn default_spice_tolerance() -> u8 {
    2
}

/// Achievement band for one nutrient, externally derived from the user's
/// health conditions.
///
/// `ratio = actual / target` scores highest inside `[min_rate, max_rate]`.
/// The hard flag and threshold participate only in the good-enough
/// termination check, never in Pareto ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AchievementBand {
    #[serde(rename = "MinRate")]
    pub min_rate: f64,

    #[serde(rename = "MaxRate")]
    pub max_rate: f64,

    #[serde(rename = "Weight")]
    pub weight: f64,

    #[serde(rename = "Hard", default)]
    pub hard: bool,

    /// Minimum objective score a hard constraint must reach.
    #[serde(rename = "HardThreshold", default)]
    pub hard_threshold: f64,
}

impl AchievementBand {
    pub const fn new(min_rate: f64, max_rate: f64, weight: f64) -> Self {
        Self {
            min_rate,
            max_rate,
            weight,
            hard: false,
            hard_threshold: 0.0,
        }
    }

    pub const fn hard(min_rate: f64, max_rate: f64, weight: f64, threshold: f64) -> Self {
        Self {
            min_rate,
            max_rate,
            weight,
            hard: true,
            hard_threshold: threshold,
        }
    }

    pub fn center(&self) -> f64 {
        (self.min_rate + self.max_rate) / 2.0
    }

    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min_rate && ratio <= self.max_rate
    }
}

/// One achievement band per tracked nutrient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientBands {
    #[serde(rename = "Bands")]
    bands: [AchievementBand; Nutrient::COUNT],
}

impl NutrientBands {
    pub fn get(&self, nutrient: Nutrient) -> AchievementBand {
        self.bands[nutrient.index()]
    }

    pub fn set(&mut self, nutrient: Nutrient, band: AchievementBand) {
        self.bands[nutrient.index()] = band;
    }

    /// True when every band is sane: 0 < min ≤ max and weight ≥ 0.
    pub fn is_valid(&self) -> bool {
        self.bands
            .iter()
            .all(|b| b.min_rate > 0.0 && b.min_rate <= b.max_rate && b.weight >= 0.0)
    }
}

impl Default for NutrientBands {
    /// General-purpose bands for a healthy adult.
    ///
    /// Calories carry the largest weight and a hard floor; sodium's band
    /// is asymmetric because staying under target is fine.
    fn default() -> Self {
        let mut bands = [AchievementBand::new(0.7, 1.3, 0.5); Nutrient::COUNT];
        bands[Nutrient::Calories.index()] = AchievementBand::hard(0.9, 1.1, 3.0, 0.5);
        bands[Nutrient::Carbs.index()] = AchievementBand::new(0.85, 1.15, 1.0);
        bands[Nutrient::Protein.index()] = AchievementBand::new(0.85, 1.15, 1.0);
        bands[Nutrient::Fat.index()] = AchievementBand::new(0.85, 1.15, 1.0);
        bands[Nutrient::Sodium.index()] = AchievementBand::new(0.5, 1.0, 0.5);
        Self { bands }
    }
}

/// Ideal fraction of calories from each macro, externally derived from
/// health conditions. Fractions sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroSplit {
    #[serde(rename = "Carbs")]
    pub carbs: f64,

    #[serde(rename = "Protein")]
    pub protein: f64,

    #[serde(rename = "Fat")]
    pub fat: f64,
}

impl MacroSplit {
    pub fn is_valid(&self) -> bool {
        self.carbs >= 0.0
            && self.protein >= 0.0
            && self.fat >= 0.0
            && ((self.carbs + self.protein + self.fat) - 1.0).abs() < 1e-6
    }
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self {
            carbs: 0.5,
            protein: 0.2,
            fat: 0.3,
        }
    }
}

/// Read-only evaluation context: what the meal should amount to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTarget {
    #[serde(rename = "Nutrients")]
    pub nutrients: NutrientVector,

    #[serde(rename = "Bands", default)]
    pub bands: NutrientBands,

    #[serde(rename = "MacroSplit", default)]
    pub macro_split: MacroSplit,
}

impl MealTarget {
    pub fn new(nutrients: NutrientVector) -> Self {
        Self {
            nutrients,
            bands: NutrientBands::default(),
            macro_split: MacroSplit::default(),
        }
    }

    /// Nutrients with a positive target; only these are tracked by the
    /// band-satisfaction filter and the deviation fallback.
    pub fn tracked_nutrients(&self) -> impl Iterator<Item = Nutrient> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter(|&n| self.nutrients.get(n) > 0.0)
    }
}
