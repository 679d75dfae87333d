use clap::{Parser, Subcommand};

/// MealOptimizer — searches meal compositions against a nutrient target
/// with NSGA-II multi-objective evolution.
#[derive(Parser, Debug)]
#[command(name = "meal_optimizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog (JSON or CSV).
    #[arg(short, long, default_value = "food_catalog.json")]
    pub catalog: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for meal compositions approximating the nutrient target.
    Plan {
        /// Target calories (kcal).
        #[arg(long, default_value_t = 2000.0)]
        calories: f64,

        /// Target carbohydrates (g).
        #[arg(long, default_value_t = 250.0)]
        carbs: f64,

        /// Target protein (g).
        #[arg(long, default_value_t = 75.0)]
        protein: f64,

        /// Target fat (g).
        #[arg(long, default_value_t = 67.0)]
        fat: f64,

        /// Optional user profile JSON (allergens, dislikes, likes, ...).
        #[arg(long)]
        profile: Option<String>,

        /// Optional achievement-band JSON overriding the defaults.
        #[arg(long)]
        bands: Option<String>,

        /// Population size.
        #[arg(long, default_value_t = 50)]
        population: usize,

        /// Generation cap.
        #[arg(long, default_value_t = 100)]
        generations: usize,

        /// Do not require a staple food in every meal.
        #[arg(long)]
        no_staple: bool,

        /// Evaluate each generation in parallel.
        #[arg(long)]
        parallel: bool,

        /// PRNG seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the resulting front as JSON to this path.
        #[arg(long)]
        export: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            calories: 2000.0,
            carbs: 250.0,
            protein: 75.0,
            fat: 67.0,
            profile: None,
            bands: None,
            population: 50,
            generations: 100,
            no_staple: false,
            parallel: false,
            seed: None,
            export: None,
        }
    }
}
