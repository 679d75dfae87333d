use std::collections::{HashMap, HashSet};

use crate::genetics::solution::Solution;
use crate::models::FoodCategory;
use crate::scoring::constants::{
    DIVERSITY_ATTRIBUTE_WEIGHT, DIVERSITY_COVERAGE_WEIGHT, DIVERSITY_DISTRIBUTION_WEIGHT,
    IDEAL_CATEGORY_MIX,
};

/// Diversity score of a solution, in [0, 1].
///
/// Blends three views of variety: how many of the ideal categories the
/// meal covers at all, how closely the gram-weighted category
/// distribution tracks the ideal mix, and how varied the foods'
/// cooking methods, flavors and spice levels are.
pub fn diversity_score(solution: &Solution) -> f64 {
    if solution.is_empty() {
        return 0.0;
    }

    DIVERSITY_COVERAGE_WEIGHT * coverage_ratio(solution)
        + DIVERSITY_DISTRIBUTION_WEIGHT * distribution_similarity(solution)
        + DIVERSITY_ATTRIBUTE_WEIGHT * attribute_variety(solution)
}

/// Share of the ideal categories present in the meal.
fn coverage_ratio(solution: &Solution) -> f64 {
    let present: HashSet<FoodCategory> =
        solution.genes().iter().map(|g| g.food.category).collect();

    let covered = IDEAL_CATEGORY_MIX
        .iter()
        .filter(|(cat, _)| present.contains(cat))
        .count();
    covered as f64 / IDEAL_CATEGORY_MIX.len() as f64
}

/// Similarity of the gram-weighted category distribution to the ideal
/// mix: 1 minus the total variation distance.
fn distribution_similarity(solution: &Solution) -> f64 {
    let total_grams: f64 = solution.genes().iter().map(|g| g.intake_g as f64).sum();
    if total_grams <= 0.0 {
        return 0.0;
    }

    let mut actual: HashMap<FoodCategory, f64> = HashMap::new();
    for gene in solution.genes() {
        *actual.entry(gene.food.category).or_insert(0.0) += gene.intake_g as f64 / total_grams;
    }

    let mut variation = 0.0;
    for (cat, ideal_share) in IDEAL_CATEGORY_MIX {
        let actual_share = actual.remove(&cat).unwrap_or(0.0);
        variation += (actual_share - ideal_share).abs();
    }
    // Categories outside the ideal mix count entirely as deviation.
    variation += actual.values().sum::<f64>();

    (1.0 - variation / 2.0).clamp(0.0, 1.0)
}

/// Variety of cooking methods, flavors and spice levels, each as a
/// distinct-values ratio over the gene count.
fn attribute_variety(solution: &Solution) -> f64 {
    let n = solution.len() as f64;

    let methods: HashSet<&str> = solution
        .genes()
        .iter()
        .map(|g| g.food.tags.cooking_method.as_str())
        .filter(|m| !m.is_empty())
        .collect();

    let flavors: HashSet<&str> = solution
        .genes()
        .iter()
        .flat_map(|g| g.food.tags.flavors.iter().map(String::as_str))
        .collect();

    let spice_levels: HashSet<u8> = solution
        .genes()
        .iter()
        .map(|g| g.food.tags.spice_level)
        .collect();

    let method_ratio = methods.len() as f64 / n;
    let flavor_ratio = (flavors.len() as f64 / n).min(1.0);
    let spice_ratio = spice_levels.len() as f64 / n;

    (method_ratio + flavor_ratio + spice_ratio) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::gene::Gene;
    use crate::models::{FoodCatalogEntry, FoodTags, NutrientVector};

    fn food(name: &str, category: FoodCategory, method: &str, flavor: &str, spice: u8) -> Gene {
        Gene::new(
            FoodCatalogEntry {
                name: name.to_string(),
                category,
                per_100g: NutrientVector::from_macros(10.0, 5.0, 2.0),
                tags: FoodTags {
                    cooking_method: method.to_string(),
                    flavors: vec![flavor.to_string()],
                    spice_level: spice,
                    ..Default::default()
                },
            },
            100,
        )
    }

    fn varied_meal() -> Solution {
        Solution::new(vec![
            food("Rice", FoodCategory::Staple, "steamed", "plain", 0),
            food("Chicken", FoodCategory::Protein, "grilled", "savory", 1),
            food("Spinach", FoodCategory::Vegetable, "stir-fried", "bitter", 2),
            food("Apple", FoodCategory::Fruit, "raw", "sweet", 0),
            food("Yogurt", FoodCategory::Dairy, "fermented", "sour", 0),
        ])
    }

    fn monotone_meal() -> Solution {
        Solution::new(vec![
            food("Chicken", FoodCategory::Protein, "fried", "savory", 1),
            food("Pork", FoodCategory::Protein, "fried", "savory", 1),
            food("Beef", FoodCategory::Protein, "fried", "savory", 1),
        ])
    }

    #[test]
    fn test_varied_beats_monotone() {
        assert!(diversity_score(&varied_meal()) > diversity_score(&monotone_meal()));
    }

    #[test]
    fn test_full_coverage() {
        assert!((coverage_ratio(&varied_meal()) - 1.0).abs() < 1e-9);
        assert!((coverage_ratio(&monotone_meal()) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_similarity_bounds() {
        for meal in [varied_meal(), monotone_meal()] {
            let s = distribution_similarity(&meal);
            assert!((0.0..=1.0).contains(&s));
        }
        assert!(
            distribution_similarity(&varied_meal()) > distribution_similarity(&monotone_meal())
        );
    }

    #[test]
    fn test_attribute_variety_distinct_values() {
        assert!(attribute_variety(&varied_meal()) > 0.8);
        assert!(attribute_variety(&monotone_meal()) < 0.5);
    }

    #[test]
    fn test_score_in_unit_interval() {
        for meal in [varied_meal(), monotone_meal()] {
            let s = diversity_score(&meal);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}
