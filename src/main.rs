use clap::Parser;
use std::fs;
use std::path::Path;

use meal_optimizer_rs::catalog::{export_json, load_catalog, FoodCatalog};
use meal_optimizer_rs::cli::{Cli, Command};
use meal_optimizer_rs::error::Result;
use meal_optimizer_rs::interface::display_outcome;
use meal_optimizer_rs::models::{MealTarget, NutrientBands, NutrientVector, UserProfile};
use meal_optimizer_rs::optimizer::{MealOptimizer, OptimizerConfig};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan {
            calories,
            carbs,
            protein,
            fat,
            profile,
            bands,
            population,
            generations,
            no_staple,
            parallel,
            seed,
            export,
        } => cmd_plan(
            &cli.catalog,
            calories,
            carbs,
            protein,
            fat,
            profile.as_deref(),
            bands.as_deref(),
            population,
            generations,
            no_staple,
            parallel,
            seed,
            export.as_deref(),
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_plan(
    catalog_path: &str,
    calories: f64,
    carbs: f64,
    protein: f64,
    fat: f64,
    profile_path: Option<&str>,
    bands_path: Option<&str>,
    population: usize,
    generations: usize,
    no_staple: bool,
    parallel: bool,
    seed: Option<u64>,
    export_path: Option<&str>,
) -> Result<()> {
    let path = Path::new(catalog_path);
    if !path.exists() {
        eprintln!("Food catalog not found: {}", catalog_path);
        eprintln!("Provide one with --catalog (JSON or CSV).");
        return Ok(());
    }

    let entries = load_catalog(path)?;
    let catalog = FoodCatalog::new(entries)?;
    println!("Loaded {} foods ({} staples)", catalog.len(), catalog.staples().len());

    let profile: UserProfile = match profile_path {
        Some(p) => serde_json::from_str(&fs::read_to_string(p)?)?,
        None => UserProfile::default(),
    };

    let mut nutrients = NutrientVector::from_macros(carbs, protein, fat);
    // The flag wins over the macro-derived value; targets may set
    // calories independently.
    nutrients.calories = calories;

    let mut target = MealTarget::new(nutrients);
    if let Some(p) = bands_path {
        target.bands = serde_json::from_str::<NutrientBands>(&fs::read_to_string(p)?)?;
    }

    let mut config = OptimizerConfig::default()
        .with_population_size(population)
        .with_max_generations(generations)
        .with_require_staple(!no_staple)
        .with_parallel_eval(parallel);
    if let Some(s) = seed {
        config = config.with_seed(s);
    }

    println!(
        "Searching: {:.0} kcal, {:.0} g carbs, {:.0} g protein, {:.0} g fat ({} foods, {} generations max)",
        calories, carbs, protein, fat, catalog.len(), generations
    );

    let optimizer = MealOptimizer::new(catalog, target.clone(), profile, config)?;
    let run = optimizer.run()?;

    if run.terminated_early {
        println!(
            "Converged after {} generations (good-enough front reached).",
            run.generations
        );
    } else {
        println!("Completed {} generations.", run.generations);
    }

    display_outcome(&run.outcome, &target);

    if let Some(p) = export_path {
        export_json(p, &run.outcome)?;
        println!();
        println!("Front written to {}", p);
    }

    Ok(())
}
