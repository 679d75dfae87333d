use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::FoodCatalog;
use crate::error::{MealError, Result};
use crate::genetics::gene::Gene;
use crate::genetics::population::Population;
use crate::genetics::solution::Solution;
use crate::models::{FoodCatalogEntry, IntakeRange};
use crate::optimizer::config::OptimizerConfig;

/// Uniform random intake inside a range, in whole grams.
pub fn random_intake(range: IntakeRange, rng: &mut impl Rng) -> u32 {
    rng.gen_range(range.min_g..=range.max_g)
}

fn random_gene(entry: &FoodCatalogEntry, rng: &mut impl Rng) -> Gene {
    let intake = random_intake(entry.intake_range(), rng);
    Gene::new(entry.clone(), intake)
}

/// Build one random solution.
///
/// When a staple is required, one random staple-category food at a
/// random in-range intake anchors the meal; the rest is filled to a
/// random gene count in `[min_foods, max_foods]` with distinct
/// non-staple foods.
pub fn random_solution(
    catalog: &FoodCatalog,
    config: &OptimizerConfig,
    rng: &mut impl Rng,
) -> Result<Solution> {
    let mut genes: Vec<Gene> = Vec::new();

    if config.require_staple {
        let staples = catalog.staples();
        let staple = staples.choose(rng).ok_or(MealError::NoStapleFoods)?;
        genes.push(random_gene(staple, rng));
    }

    let mut pool: Vec<&FoodCatalogEntry> = if config.require_staple {
        catalog.non_staples()
    } else {
        catalog.entries().iter().collect()
    };
    pool.shuffle(rng);

    let target_count = rng.gen_range(config.min_foods..=config.max_foods);
    for entry in pool {
        if genes.len() >= target_count {
            break;
        }
        genes.push(random_gene(entry, rng));
    }

    Ok(Solution::new(genes))
}

/// Seed a full starting population.
///
/// Fails fast when the catalog cannot produce a valid solution at all,
/// which keeps "bad inputs" distinguishable from "no Pareto solution
/// found" later on.
pub fn seed_population(
    catalog: &FoodCatalog,
    config: &OptimizerConfig,
    rng: &mut impl Rng,
) -> Result<Population> {
    if catalog.is_empty() {
        return Err(MealError::EmptyCatalog);
    }
    if config.require_staple && catalog.staples().is_empty() {
        return Err(MealError::NoStapleFoods);
    }
    // A staple-anchored meal draws the rest from the non-staple pool.
    let usable = if config.require_staple {
        catalog.non_staples().len() + 1
    } else {
        catalog.len()
    };
    if usable < config.min_foods {
        return Err(MealError::InvalidConfig(format!(
            "catalog supports at most {} distinct foods per meal but min_foods is {}",
            usable, config.min_foods
        )));
    }

    let mut solutions = Vec::with_capacity(config.population_size);
    for _ in 0..config.population_size {
        solutions.push(random_solution(catalog, config, rng)?);
    }
    Ok(Population::new(solutions))
}
