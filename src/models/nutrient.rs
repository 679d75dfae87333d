use serde::{Deserialize, Serialize};

/// Calories supplied per gram of each macronutrient.
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// A tracked nutrient.
///
/// Units: calories in kcal, macros (carbs/protein/fat) in grams,
/// minerals in milligrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Calories,
    Carbs,
    Protein,
    Fat,
    Calcium,
    Potassium,
    Sodium,
    Magnesium,
    Iron,
    Phosphorus,
}

impl Nutrient {
    /// All tracked nutrients, in score-vector order.
    pub const ALL: [Nutrient; 10] = [
        Nutrient::Calories,
        Nutrient::Carbs,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Calcium,
        Nutrient::Potassium,
        Nutrient::Sodium,
        Nutrient::Magnesium,
        Nutrient::Iron,
        Nutrient::Phosphorus,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Display name, also used as the objective name.
    pub fn name(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Carbs => "carbs",
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Calcium => "calcium",
            Nutrient::Potassium => "potassium",
            Nutrient::Sodium => "sodium",
            Nutrient::Magnesium => "magnesium",
            Nutrient::Iron => "iron",
            Nutrient::Phosphorus => "phosphorus",
        }
    }

    /// Index into score-vector order.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|n| n == self).unwrap_or(0)
    }

    /// Whether this nutrient is one of the calorie-bearing macros
    /// (or calories itself).
    pub fn is_macro(&self) -> bool {
        matches!(
            self,
            Nutrient::Calories | Nutrient::Carbs | Nutrient::Protein | Nutrient::Fat
        )
    }

    /// Whether overshooting the target is penalized sharply.
    ///
    /// Calories, fat and sodium get the steep above-band decay; the
    /// remaining nutrients are forgiven more gently.
    pub fn excess_penalized(&self) -> bool {
        matches!(self, Nutrient::Calories | Nutrient::Fat | Nutrient::Sodium)
    }
}

/// Fixed-shape vector of nutrient quantities.
///
/// Value-semantic: arithmetic returns new vectors, never mutates in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientVector {
    #[serde(rename = "Calories", default)]
    pub calories: f64,

    #[serde(rename = "Carbs", default)]
    pub carbs: f64,

    #[serde(rename = "Protein", default)]
    pub protein: f64,

    #[serde(rename = "Fat", default)]
    pub fat: f64,

    #[serde(rename = "Calcium", default)]
    pub calcium: f64,

    #[serde(rename = "Potassium", default)]
    pub potassium: f64,

    #[serde(rename = "Sodium", default)]
    pub sodium: f64,

    #[serde(rename = "Magnesium", default)]
    pub magnesium: f64,

    #[serde(rename = "Iron", default)]
    pub iron: f64,

    #[serde(rename = "Phosphorus", default)]
    pub phosphorus: f64,
}

impl NutrientVector {
    /// Build a vector from macro amounts, deriving calories as
    /// 4·carbs + 4·protein + 9·fat.
    pub fn from_macros(carbs: f64, protein: f64, fat: f64) -> Self {
        Self {
            calories: KCAL_PER_G_CARBS * carbs + KCAL_PER_G_PROTEIN * protein + KCAL_PER_G_FAT * fat,
            carbs,
            protein,
            fat,
            ..Default::default()
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Carbs => self.carbs,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Calcium => self.calcium,
            Nutrient::Potassium => self.potassium,
            Nutrient::Sodium => self.sodium,
            Nutrient::Magnesium => self.magnesium,
            Nutrient::Iron => self.iron,
            Nutrient::Phosphorus => self.phosphorus,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        match nutrient {
            Nutrient::Calories => self.calories = value,
            Nutrient::Carbs => self.carbs = value,
            Nutrient::Protein => self.protein = value,
            Nutrient::Fat => self.fat = value,
            Nutrient::Calcium => self.calcium = value,
            Nutrient::Potassium => self.potassium = value,
            Nutrient::Sodium => self.sodium = value,
            Nutrient::Magnesium => self.magnesium = value,
            Nutrient::Iron => self.iron = value,
            Nutrient::Phosphorus => self.phosphorus = value,
        }
    }

    /// Multiply every component by a factor.
    pub fn scale(&self, factor: f64) -> Self {
        let mut out = *self;
        for n in Nutrient::ALL {
            out.set(n, self.get(n) * factor);
        }
        out
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = *self;
        for n in Nutrient::ALL {
            out.set(n, self.get(n) + other.get(n));
        }
        out
    }

    /// Component-wise difference.
    pub fn subtract(&self, other: &Self) -> Self {
        let mut out = *self;
        for n in Nutrient::ALL {
            out.set(n, self.get(n) - other.get(n));
        }
        out
    }

    /// True when every component is non-negative.
    pub fn is_valid(&self) -> bool {
        Nutrient::ALL.iter().all(|&n| self.get(n) >= 0.0)
    }

    /// Calories contributed by each macro, in (carbs, protein, fat) order.
    pub fn macro_calories(&self) -> (f64, f64, f64) {
        (
            self.carbs * KCAL_PER_G_CARBS,
            self.protein * KCAL_PER_G_PROTEIN,
            self.fat * KCAL_PER_G_FAT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    fn sample_vector() -> NutrientVector {
        NutrientVector {
            calories: 200.0,
            carbs: 30.0,
            protein: 10.0,
            fat: 4.0,
            calcium: 120.0,
            potassium: 300.0,
            sodium: 80.0,
            magnesium: 25.0,
            iron: 1.5,
            phosphorus: 90.0,
        }
    }

    #[test]
    fn test_from_macros_derives_calories() {
        let v = NutrientVector::from_macros(250.0, 75.0, 67.0);
        assert_float_absolute_eq!(v.calories, 4.0 * 250.0 + 4.0 * 75.0 + 9.0 * 67.0, 1e-9);
        assert_float_absolute_eq!(v.carbs, 250.0, 1e-9);
        assert_eq!(v.calcium, 0.0);
    }

    #[test]
    fn test_scale() {
        let v = sample_vector().scale(0.5);
        assert_float_absolute_eq!(v.calories, 100.0, 1e-9);
        assert_float_absolute_eq!(v.iron, 0.75, 1e-9);
    }

    #[test]
    fn test_scale_round_trip() {
        let original = sample_vector();
        for r in [0.3, 2.0, 7.5] {
            let back = original.scale(r).scale(1.0 / r);
            for n in Nutrient::ALL {
                assert_float_absolute_eq!(back.get(n), original.get(n), 1e-9);
            }
        }
    }

    #[test]
    fn test_add_subtract() {
        let v = sample_vector();
        let sum = v.add(&v);
        assert_float_absolute_eq!(sum.protein, 20.0, 1e-9);

        let zero = sum.subtract(&v).subtract(&v);
        for n in Nutrient::ALL {
            assert_float_absolute_eq!(zero.get(n), 0.0, 1e-9);
        }
    }

    #[test]
    fn test_get_set_cover_all_nutrients() {
        let mut v = NutrientVector::default();
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            v.set(*n, i as f64);
        }
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(v.get(*n), i as f64);
        }
    }

    #[test]
    fn test_macro_calories() {
        let (c, p, f) = sample_vector().macro_calories();
        assert_float_absolute_eq!(c, 120.0, 1e-9);
        assert_float_absolute_eq!(p, 40.0, 1e-9);
        assert_float_absolute_eq!(f, 36.0, 1e-9);
    }
}
