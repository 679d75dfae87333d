use crate::error::{MealError, Result};
use crate::genetics::operators::Selection;

/// All parameters controlling the evolutionary loop.
///
/// Built with chainable setters and validated eagerly: the engine
/// refuses to construct with an invalid configuration.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Solutions per generation.
    pub population_size: usize,

    /// Hard cap on generations.
    pub max_generations: usize,

    /// Probability that a parent pair recombines instead of cloning.
    pub crossover_rate: f64,

    /// Probability that a child mutates.
    pub mutation_rate: f64,

    /// Fraction of a gene's intake span an intake jitter may move.
    pub mutation_strength: f64,

    /// Smallest and largest gene counts a valid meal may have.
    pub min_foods: usize,
    pub max_foods: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Front-1 size required before the good-enough check can stop the
    /// run early.
    pub min_pareto_solutions: usize,

    /// Whether every meal must contain exactly one staple food.
    pub require_staple: bool,

    /// Evaluate each generation's solutions in parallel. Evaluation is
    /// the only phase that parallelizes; sorting, crowding and selection
    /// stay sequential.
    pub parallel_eval: bool,

    /// Seed for the PRNG stream; `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            crossover_rate: 0.9,
            mutation_rate: 0.3,
            mutation_strength: 0.3,
            min_foods: 3,
            max_foods: 8,
            selection: Selection::default(),
            min_pareto_solutions: 3,
            require_staple: true,
            parallel_eval: false,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_mutation_strength(mut self, strength: f64) -> Self {
        self.mutation_strength = strength;
        self
    }

    pub fn with_foods_per_meal(mut self, min: usize, max: usize) -> Self {
        self.min_foods = min;
        self.max_foods = max;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Convenience for `with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_min_pareto_solutions(mut self, n: usize) -> Self {
        self.min_pareto_solutions = n;
        self
    }

    pub fn with_require_staple(mut self, required: bool) -> Self {
        self.require_staple = required;
        self
    }

    pub fn with_parallel_eval(mut self, parallel: bool) -> Self {
        self.parallel_eval = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate every parameter; called by the engine at construction.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MealError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(MealError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(MealError::InvalidConfig(
                "crossover_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MealError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_strength) {
            return Err(MealError::InvalidConfig(
                "mutation_strength must be within [0, 1]".into(),
            ));
        }
        if self.min_foods == 0 {
            return Err(MealError::InvalidConfig(
                "min_foods must be at least 1".into(),
            ));
        }
        if self.min_foods > self.max_foods {
            return Err(MealError::InvalidConfig(format!(
                "min_foods ({}) must not exceed max_foods ({})",
                self.min_foods, self.max_foods
            )));
        }
        if let Selection::Tournament(k) = self.selection {
            if k == 0 {
                return Err(MealError::InvalidConfig(
                    "tournament size must be at least 1".into(),
                ));
            }
        }
        if self.min_pareto_solutions == 0 {
            return Err(MealError::InvalidConfig(
                "min_pareto_solutions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
