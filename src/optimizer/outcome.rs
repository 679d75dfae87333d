use serde::Serialize;

use crate::genetics::solution::Solution;
use crate::models::{MealTarget, Nutrient};

/// How many solutions the best-effort fallback keeps.
const FALLBACK_COUNT: usize = 3;

/// The final Pareto front, tagged by how it was produced.
///
/// `Verified` solutions have every tracked nutrient ratio inside its
/// achievement band. When none qualify, the front's closest members are
/// returned as `BestEffort` instead of an empty result; the two kinds
/// are semantically different answers and stay distinguishable.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "Kind", content = "Solutions")]
pub enum ParetoOutcome {
    Verified(Vec<Solution>),
    BestEffort(Vec<Solution>),
}

impl ParetoOutcome {
    pub fn solutions(&self) -> &[Solution] {
        match self {
            ParetoOutcome::Verified(s) | ParetoOutcome::BestEffort(s) => s,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, ParetoOutcome::Verified(_))
    }

    pub fn len(&self) -> usize {
        self.solutions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions().is_empty()
    }
}

/// Whether every tracked nutrient ratio lies inside its band.
pub fn all_bands_satisfied(solution: &Solution, target: &MealTarget) -> bool {
    target.tracked_nutrients().all(|n| {
        let ratio = solution.total().get(n) / target.nutrients.get(n);
        target.bands.get(n).contains(ratio)
    })
}

/// Weighted deviation from target across tracked nutrients: calories
/// count triple, the other macros once, minerals half.
pub fn weighted_deviation(solution: &Solution, target: &MealTarget) -> f64 {
    target
        .tracked_nutrients()
        .map(|n| {
            let ratio = solution.total().get(n) / target.nutrients.get(n);
            let weight = match n {
                Nutrient::Calories => 3.0,
                _ if n.is_macro() => 1.0,
                _ => 0.5,
            };
            weight * (ratio - 1.0).abs()
        })
        .sum()
}

/// Build the outcome from the final first front.
///
/// Filters to band-satisfying solutions; when none survive, falls back
/// to the [`FALLBACK_COUNT`] lowest-deviation members. Either way the
/// result is ordered best-first and never empty for a non-empty front.
pub fn extract_outcome(mut front: Vec<Solution>, target: &MealTarget) -> ParetoOutcome {
    let mut verified: Vec<Solution> = front
        .iter()
        .filter(|s| all_bands_satisfied(s, target))
        .cloned()
        .collect();

    if !verified.is_empty() {
        verified.sort_by(|a, b| {
            b.weighted_score()
                .partial_cmp(&a.weighted_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        return ParetoOutcome::Verified(verified);
    }

    front.sort_by(|a, b| {
        weighted_deviation(a, target)
            .partial_cmp(&weighted_deviation(b, target))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    front.truncate(FALLBACK_COUNT);
    ParetoOutcome::BestEffort(front)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::gene::Gene;
    use crate::models::{
        FoodCatalogEntry, FoodCategory, FoodTags, MealTarget, NutrientVector,
    };

    /// A one-gene meal delivering exactly `grams` of a 1 kcal/g,
    /// carb-only food.
    fn meal(grams: u32) -> Solution {
        Solution::new(vec![Gene::new(
            FoodCatalogEntry {
                name: "Unit Food".to_string(),
                category: FoodCategory::Staple,
                per_100g: NutrientVector::from_macros(25.0, 0.0, 0.0),
                tags: FoodTags::default(),
            },
            grams,
        )])
    }

    fn target_of(calories: f64) -> MealTarget {
        let mut nutrients = NutrientVector::default();
        nutrients.calories = calories;
        nutrients.carbs = calories / 4.0;
        MealTarget::new(nutrients)
    }

    #[test]
    fn test_in_band_solution_is_verified() {
        let target = target_of(1000.0);
        let outcome = extract_outcome(vec![meal(1000)], &target);
        assert!(outcome.is_verified());
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    fn test_out_of_band_front_falls_back() {
        let target = target_of(1000.0);
        // All three miss the 0.9–1.1 calorie band.
        let outcome = extract_outcome(vec![meal(300), meal(500), meal(700)], &target);
        assert!(!outcome.is_verified());
        assert!(!outcome.is_empty());
    }

    #[test]
    fn test_fallback_orders_by_deviation_and_truncates() {
        let target = target_of(1000.0);
        let front = vec![meal(200), meal(800), meal(400), meal(600)];
        let outcome = extract_outcome(front, &target);

        assert_eq!(outcome.len(), 3);
        // Closest to target first.
        assert_eq!(outcome.solutions()[0].total().calories, 800.0);
        assert_eq!(outcome.solutions()[1].total().calories, 600.0);
        assert_eq!(outcome.solutions()[2].total().calories, 400.0);
    }

    #[test]
    fn test_weighted_deviation_weights_calories_triple() {
        let target = target_of(1000.0);
        let s = meal(500);
        // Calories and carbs both at ratio 0.5: 3·0.5 + 1·0.5 = 2.0.
        assert!((weighted_deviation(&s, &target) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_bands_satisfied() {
        let target = target_of(1000.0);
        assert!(all_bands_satisfied(&meal(1000), &target));
        assert!(all_bands_satisfied(&meal(950), &target));
        assert!(!all_bands_satisfied(&meal(500), &target));
    }

    #[test]
    fn test_verified_ordered_by_weighted_score() {
        let target = target_of(1000.0);
        let outcome = extract_outcome(vec![meal(1050), meal(1000), meal(950)], &target);
        assert!(outcome.is_verified());

        let scores: Vec<f64> = outcome
            .solutions()
            .iter()
            .map(Solution::weighted_score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
