use serde::Serialize;

use crate::models::{FoodCatalogEntry, IntakeRange, NutrientVector};

/// One (food, intake) pair in a solution's encoding.
///
/// Genes are created at initialization, crossover or mutation, and the
/// intake only ever changes through the mutation operator; everything
/// else treats a gene as a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gene {
    pub food: FoodCatalogEntry,

    /// Intake in whole grams.
    pub intake_g: u32,
}

impl Gene {
    pub fn new(food: FoodCatalogEntry, intake_g: u32) -> Self {
        Self { food, intake_g }
    }

    /// Nutrient totals contributed by this gene.
    pub fn nutrients(&self) -> NutrientVector {
        self.food.nutrients_for(self.intake_g)
    }

    /// Calories contributed by this gene.
    pub fn calories(&self) -> f64 {
        self.food.calories_per_gram() * self.intake_g as f64
    }

    pub fn intake_range(&self) -> IntakeRange {
        self.food.intake_range()
    }

    /// Whether the intake lies inside the food's allowed range.
    pub fn in_range(&self) -> bool {
        self.intake_range().contains(self.intake_g)
    }

    /// Copy of this gene with a different intake.
    pub fn with_intake(&self, intake_g: u32) -> Self {
        Self {
            food: self.food.clone(),
            intake_g,
        }
    }

    pub fn key(&self) -> String {
        self.food.key()
    }

    pub fn is_staple(&self) -> bool {
        self.food.is_staple()
    }
}
