use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::FoodCatalog;
use crate::genetics::gene::Gene;
use crate::genetics::seeding::random_intake;
use crate::genetics::solution::Solution;
use crate::models::{MealTarget, Nutrient};
use crate::optimizer::config::OptimizerConfig;

/// Smallest intake adjustment worth applying during directed repair, in
/// grams. Anything finer is noise at meal scale.
const MIN_REPAIR_CHANGE_G: i64 = 5;

/// At most this many genes are adjusted by one repair pass.
const MAX_REPAIR_GENES: usize = 3;

/// The six mutation strategies.
///
/// Each is an isolated function so it can be tested on its own; the
/// engine draws one uniformly per mutation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Perturb one gene's intake within its range.
    IntakeJitter,
    /// Replace a gene with a same-category food not already present.
    FoodSwap,
    /// Insert a new food, staple-category first when one is missing.
    FoodAdd,
    /// Remove a gene; never the sole remaining staple.
    FoodDrop,
    /// Push the densest gene's intake toward the calorie target.
    CalorieRebalance,
    /// Nutrient-sensitivity-directed repair of the worst deficiency.
    SensitivityRepair,
}

impl MutationKind {
    pub const ALL: [MutationKind; 6] = [
        MutationKind::IntakeJitter,
        MutationKind::FoodSwap,
        MutationKind::FoodAdd,
        MutationKind::FoodDrop,
        MutationKind::CalorieRebalance,
        MutationKind::SensitivityRepair,
    ];
}

/// Read-only inputs a mutation may consult.
pub struct MutationContext<'a> {
    pub catalog: &'a FoodCatalog,
    pub target: &'a MealTarget,
    pub config: &'a OptimizerConfig,
}

/// Apply one strategy. `None` means the strategy had no candidates or
/// nothing to do; the caller keeps the child unchanged and proceeds.
pub fn mutate(
    solution: &Solution,
    kind: MutationKind,
    ctx: &MutationContext,
    rng: &mut impl Rng,
) -> Option<Solution> {
    if solution.is_empty() {
        return None;
    }
    match kind {
        MutationKind::IntakeJitter => intake_jitter(solution, ctx, rng),
        MutationKind::FoodSwap => food_swap(solution, ctx, rng),
        MutationKind::FoodAdd => food_add(solution, ctx, rng),
        MutationKind::FoodDrop => food_drop(solution, rng),
        MutationKind::CalorieRebalance => calorie_rebalance(solution, ctx),
        MutationKind::SensitivityRepair => sensitivity_repair(solution, ctx),
    }
}

/// Apply a uniformly drawn strategy.
pub fn mutate_random(
    solution: &Solution,
    ctx: &MutationContext,
    rng: &mut impl Rng,
) -> Option<Solution> {
    let kind = *MutationKind::ALL.choose(rng).expect("ALL is non-empty");
    mutate(solution, kind, ctx, rng)
}

fn intake_jitter(
    solution: &Solution,
    ctx: &MutationContext,
    rng: &mut impl Rng,
) -> Option<Solution> {
    let idx = rng.gen_range(0..solution.len());
    let gene = &solution.genes()[idx];
    let range = gene.intake_range();

    let max_delta = (range.span() as f64 * ctx.config.mutation_strength).max(1.0);
    let delta = rng.gen_range(-max_delta..=max_delta).round() as i64;

    let new_intake = range.clamp(gene.intake_g as i64 + delta);
    if new_intake == gene.intake_g {
        return None;
    }
    Some(solution.with_intake(idx, new_intake))
}

fn food_swap(solution: &Solution, ctx: &MutationContext, rng: &mut impl Rng) -> Option<Solution> {
    let idx = rng.gen_range(0..solution.len());
    let gene = &solution.genes()[idx];

    let candidates: Vec<_> = ctx
        .catalog
        .by_category(gene.food.category)
        .into_iter()
        .filter(|e| !solution.has_food(&e.name))
        .collect();

    let replacement = candidates.choose(rng)?;
    let intake = random_intake(replacement.intake_range(), rng);
    Some(solution.with_replaced(idx, Gene::new((*replacement).clone(), intake)))
}

fn food_add(solution: &Solution, ctx: &MutationContext, rng: &mut impl Rng) -> Option<Solution> {
    if solution.len() >= ctx.config.max_foods {
        return None;
    }

    let staple_missing = ctx.config.require_staple && solution.staple_count() == 0;
    let candidates: Vec<_> = if staple_missing {
        ctx.catalog
            .staples()
            .into_iter()
            .filter(|e| !solution.has_food(&e.name))
            .collect()
    } else if ctx.config.require_staple {
        // The staple slot is taken; a second one would be invalid.
        ctx.catalog
            .non_staples()
            .into_iter()
            .filter(|e| !solution.has_food(&e.name))
            .collect()
    } else {
        ctx.catalog
            .entries()
            .iter()
            .filter(|e| !solution.has_food(&e.name))
            .collect()
    };

    let entry = candidates.choose(rng)?;
    let intake = random_intake(entry.intake_range(), rng);
    Some(solution.with_gene(Gene::new((*entry).clone(), intake)))
}

fn food_drop(solution: &Solution, rng: &mut impl Rng) -> Option<Solution> {
    if solution.len() <= 1 {
        return None;
    }

    let sole_staple = solution.staple_count() == 1;
    let droppable: Vec<usize> = (0..solution.len())
        .filter(|&i| !(sole_staple && solution.genes()[i].is_staple()))
        .collect();

    let idx = droppable.choose(rng)?;
    Some(solution.without_gene(*idx))
}

fn calorie_rebalance(solution: &Solution, ctx: &MutationContext) -> Option<Solution> {
    let gap = ctx.target.nutrients.calories - solution.total().calories;
    if gap.abs() < 1.0 {
        return None;
    }

    // Adjust the most calorie-dense gene; it moves the total furthest
    // per gram of change.
    let (idx, gene) = solution
        .genes()
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.food
                .calories_per_gram()
                .partial_cmp(&b.food.calories_per_gram())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let cpg = gene.food.calories_per_gram();
    if cpg <= 0.0 {
        return None;
    }

    let mut delta = (gap / cpg).round() as i64;
    if delta.abs() < MIN_REPAIR_CHANGE_G {
        delta = if gap > 0.0 {
            MIN_REPAIR_CHANGE_G
        } else {
            -MIN_REPAIR_CHANGE_G
        };
    }

    let range = gene.intake_range();
    let new_intake = range.clamp(gene.intake_g as i64 + delta);
    if new_intake == gene.intake_g {
        return None;
    }
    Some(solution.with_intake(idx, new_intake))
}

/// Directed repair of the worst nutrient deficiency.
///
/// Achievement ratios are computed for every tracked nutrient; among the
/// out-of-band deficiencies the worst one is chosen, genes are ranked by
/// their fractional contribution to that nutrient, and up to
/// [`MAX_REPAIR_GENES`] top contributors get their intakes raised
/// proportionally to deviation size and contribution share. Changes
/// under [`MIN_REPAIR_CHANGE_G`] grams are discarded.
fn sensitivity_repair(solution: &Solution, ctx: &MutationContext) -> Option<Solution> {
    let target = &ctx.target.nutrients;
    let total = solution.total();

    let mut worst: Option<(Nutrient, f64)> = None;
    for n in ctx.target.tracked_nutrients() {
        let ratio = total.get(n) / target.get(n);
        let band = ctx.target.bands.get(n);
        if ratio < band.min_rate {
            let deviation = band.min_rate - ratio;
            if worst.map_or(true, |(_, d)| deviation > d) {
                worst = Some((n, deviation));
            }
        }
    }
    let (nutrient, deviation) = worst?;

    let total_amount = total.get(nutrient);
    let per_gram: Vec<f64> = solution
        .genes()
        .iter()
        .map(|g| g.food.per_100g.get(nutrient) / 100.0)
        .collect();

    // Fractional contribution per gene; when the meal currently carries
    // none of the nutrient, rank by per-gram content instead.
    let shares: Vec<f64> = if total_amount > 0.0 {
        solution
            .genes()
            .iter()
            .map(|g| g.nutrients().get(nutrient) / total_amount)
            .collect()
    } else {
        let content_sum: f64 = per_gram.iter().sum();
        if content_sum <= 0.0 {
            return None;
        }
        per_gram.iter().map(|c| c / content_sum).collect()
    };

    let mut ranked: Vec<usize> = (0..solution.len()).filter(|&i| per_gram[i] > 0.0).collect();
    ranked.sort_by(|&a, &b| {
        shares[b]
            .partial_cmp(&shares[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let needed = deviation * target.get(nutrient);
    let mut repaired = solution.clone();
    let mut changed = false;

    for &idx in ranked.iter().take(MAX_REPAIR_GENES) {
        let gene = &repaired.genes()[idx];
        let grams = ((needed * shares[idx]) / per_gram[idx]).round() as i64;
        if grams.abs() < MIN_REPAIR_CHANGE_G {
            continue;
        }

        let range = gene.intake_range();
        let new_intake = range.clamp(gene.intake_g as i64 + grams);
        if (new_intake as i64 - gene.intake_g as i64).abs() < MIN_REPAIR_CHANGE_G {
            continue;
        }

        repaired = repaired.with_intake(idx, new_intake);
        changed = true;
    }

    changed.then_some(repaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AchievementBand, FoodCatalogEntry, FoodCategory, FoodTags, NutrientVector,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(name: &str, category: FoodCategory, per_100g: NutrientVector) -> FoodCatalogEntry {
        FoodCatalogEntry {
            name: name.to_string(),
            category,
            per_100g,
            tags: FoodTags::default(),
        }
    }

    fn sample_catalog() -> FoodCatalog {
        FoodCatalog::new(vec![
            entry(
                "Rice",
                FoodCategory::Staple,
                NutrientVector::from_macros(28.0, 2.7, 0.3),
            ),
            entry(
                "Noodles",
                FoodCategory::Staple,
                NutrientVector::from_macros(25.0, 4.5, 1.1),
            ),
            entry(
                "Chicken",
                FoodCategory::Protein,
                NutrientVector::from_macros(0.0, 31.0, 3.6),
            ),
            entry(
                "Tofu",
                FoodCategory::Protein,
                NutrientVector::from_macros(1.9, 8.0, 4.8),
            ),
            entry(
                "Spinach",
                FoodCategory::Vegetable,
                NutrientVector::from_macros(3.6, 2.9, 0.4),
            ),
            entry(
                "Apple",
                FoodCategory::Fruit,
                NutrientVector::from_macros(14.0, 0.3, 0.2),
            ),
        ])
        .unwrap()
    }

    fn sample_solution(catalog: &FoodCatalog) -> Solution {
        Solution::new(vec![
            Gene::new(catalog.get("Rice").unwrap().clone(), 200),
            Gene::new(catalog.get("Chicken").unwrap().clone(), 100),
            Gene::new(catalog.get("Spinach").unwrap().clone(), 100),
        ])
    }

    fn sample_target() -> MealTarget {
        MealTarget::new(NutrientVector::from_macros(250.0, 75.0, 67.0))
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let catalog = sample_catalog();
        let target = sample_target();
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };
        let solution = sample_solution(&catalog);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            if let Some(mutated) = mutate(&solution, MutationKind::IntakeJitter, &ctx, &mut rng) {
                assert!(mutated.genes().iter().all(Gene::in_range));
            }
        }
    }

    #[test]
    fn test_swap_keeps_category_and_uniqueness() {
        let catalog = sample_catalog();
        let target = sample_target();
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };
        let solution = sample_solution(&catalog);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            if let Some(mutated) = mutate(&solution, MutationKind::FoodSwap, &ctx, &mut rng) {
                assert_eq!(mutated.len(), solution.len());
                let categories_before: Vec<_> =
                    solution.genes().iter().map(|g| g.food.category).collect();
                let categories_after: Vec<_> =
                    mutated.genes().iter().map(|g| g.food.category).collect();
                assert_eq!(categories_before, categories_after);

                let mut seen = std::collections::HashSet::new();
                assert!(mutated.genes().iter().all(|g| seen.insert(g.key())));
            }
        }
    }

    #[test]
    fn test_add_respects_max_foods() {
        let catalog = sample_catalog();
        let target = sample_target();
        let config = OptimizerConfig::default().with_foods_per_meal(2, 3);
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };
        let solution = sample_solution(&catalog);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(mutate(&solution, MutationKind::FoodAdd, &ctx, &mut rng).is_none());
    }

    #[test]
    fn test_add_restores_missing_staple_first() {
        let catalog = sample_catalog();
        let target = sample_target();
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };
        let no_staple = Solution::new(vec![
            Gene::new(catalog.get("Chicken").unwrap().clone(), 100),
            Gene::new(catalog.get("Spinach").unwrap().clone(), 100),
        ]);
        let mut rng = StdRng::seed_from_u64(4);

        let mutated = mutate(&no_staple, MutationKind::FoodAdd, &ctx, &mut rng).unwrap();
        assert_eq!(mutated.staple_count(), 1);
    }

    #[test]
    fn test_drop_never_removes_sole_staple() {
        let catalog = sample_catalog();
        let target = sample_target();
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };
        let solution = sample_solution(&catalog);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let mutated = mutate(&solution, MutationKind::FoodDrop, &ctx, &mut rng).unwrap();
            assert_eq!(mutated.staple_count(), 1);
            assert_eq!(mutated.len(), solution.len() - 1);
        }
    }

    #[test]
    fn test_rebalance_moves_toward_calorie_target() {
        let catalog = sample_catalog();
        let target = sample_target();
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };
        let solution = sample_solution(&catalog);

        let gap_before = (target.nutrients.calories - solution.total().calories).abs();
        let mutated = calorie_rebalance(&solution, &ctx).unwrap();
        let gap_after = (target.nutrients.calories - mutated.total().calories).abs();
        assert!(gap_after < gap_before);
    }

    #[test]
    fn test_repair_raises_deficient_nutrient() {
        let catalog = sample_catalog();
        let solution = sample_solution(&catalog);
        // Every ratio starts at 1.0; only protein is pushed far above
        // what the meal provides, so it is the worst deficiency.
        let mut target = MealTarget::new(*solution.total());
        target.nutrients.protein = 120.0;
        target
            .bands
            .set(Nutrient::Protein, AchievementBand::new(0.9, 1.1, 1.0));
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };

        let repaired = sensitivity_repair(&solution, &ctx).unwrap();
        assert!(repaired.total().protein > solution.total().protein);
        assert!(repaired.genes().iter().all(Gene::in_range));

        // The top protein contributor is the one adjusted.
        let chicken_before = solution.genes()[1].intake_g;
        let chicken_after = repaired.genes()[1].intake_g;
        assert!(chicken_after > chicken_before);
    }

    #[test]
    fn test_repair_noop_when_all_bands_met() {
        let catalog = sample_catalog();
        let solution = sample_solution(&catalog);
        // Target equal to the current totals: every ratio is 1.0.
        let target = MealTarget::new(*solution.total());
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };

        assert!(sensitivity_repair(&solution, &ctx).is_none());
    }

    #[test]
    fn test_small_changes_discarded() {
        let catalog = sample_catalog();
        let solution = sample_solution(&catalog);
        // Tiny deficiency: the implied adjustment is under the 5 g floor.
        let mut target = MealTarget::new(*solution.total());
        target.nutrients.protein *= 1.001;
        target
            .bands
            .set(Nutrient::Protein, AchievementBand::new(1.0, 1.1, 1.0));
        let config = OptimizerConfig::default();
        let ctx = MutationContext {
            catalog: &catalog,
            target: &target,
            config: &config,
        };

        assert!(sensitivity_repair(&solution, &ctx).is_none());
    }
}
