use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::FoodCatalog;
use crate::error::Result;
use crate::genetics::operators::{crossover, mutate_random, MutationContext};
use crate::genetics::population::Population;
use crate::genetics::seeding::{random_solution, seed_population};
use crate::genetics::sorting::{assign_crowding_distance, non_dominated_sort};
use crate::models::{MealTarget, UserProfile};
use crate::optimizer::config::OptimizerConfig;
use crate::optimizer::outcome::{extract_outcome, ParetoOutcome};
use crate::scoring::constants::AGGREGATE_SCORE_THRESHOLD;
use crate::scoring::evaluator::MultiObjectiveEvaluator;
use crate::scoring::preference::PreferenceFactors;

/// Result of one optimization run.
#[derive(Debug)]
pub struct OptimizerRun {
    pub outcome: ParetoOutcome,

    /// Generations actually executed.
    pub generations: usize,

    /// Whether the good-enough check stopped the run before the cap.
    pub terminated_early: bool,
}

/// Owns the run's read-only inputs and drives the generational loop.
pub struct MealOptimizer {
    catalog: FoodCatalog,
    target: MealTarget,
    evaluator: MultiObjectiveEvaluator,
    config: OptimizerConfig,
}

impl MealOptimizer {
    /// Construct with default preference factors.
    ///
    /// The configuration is validated here; a bad one never reaches the
    /// loop.
    pub fn new(
        catalog: FoodCatalog,
        target: MealTarget,
        profile: UserProfile,
        config: OptimizerConfig,
    ) -> Result<Self> {
        Self::with_factors(catalog, target, profile, PreferenceFactors::default(), config)
    }

    pub fn with_factors(
        catalog: FoodCatalog,
        target: MealTarget,
        profile: UserProfile,
        factors: PreferenceFactors,
        config: OptimizerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let evaluator = MultiObjectiveEvaluator::standard(&target, profile, factors);
        Ok(Self {
            catalog,
            target,
            evaluator,
            config,
        })
    }

    /// Run the full NSGA-II loop and extract the final front.
    pub fn run(&self) -> Result<OptimizerRun> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // Generation 0: seed, evaluate, rank, crowd.
        let mut population = seed_population(&self.catalog, &self.config, &mut rng)?;
        self.evaluate(&mut population);
        let fronts = non_dominated_sort(&mut population);
        assign_crowding_distance(&mut population, &fronts);

        let mut generations = 0;
        let mut terminated_early = false;

        for _ in 0..self.config.max_generations {
            if self.good_enough(&population) {
                terminated_early = true;
                break;
            }

            let mut offspring = self.breed(&population, &mut rng)?;
            self.evaluate(&mut offspring);

            population.merge(offspring);
            let fronts = non_dominated_sort(&mut population);
            assign_crowding_distance(&mut population, &fronts);
            population = self.truncate(population, &fronts);

            // Truncation preserves ranks but shifts front membership;
            // re-rank so selection and the next merge see a clean state.
            let fronts = non_dominated_sort(&mut population);
            assign_crowding_distance(&mut population, &fronts);

            generations += 1;
        }

        let outcome = extract_outcome(population.front_cloned(1), &self.target);
        Ok(OptimizerRun {
            outcome,
            generations,
            terminated_early,
        })
    }

    fn evaluate(&self, population: &mut Population) {
        self.evaluator.evaluate_all(
            population.solutions_mut(),
            &self.target,
            self.config.parallel_eval,
        );
    }

    /// Build an offspring population of equal size.
    ///
    /// Children that a mutation left structurally invalid are reseeded
    /// from scratch rather than patched.
    fn breed(&self, parents: &Population, rng: &mut StdRng) -> Result<Population> {
        let ctx = MutationContext {
            catalog: &self.catalog,
            target: &self.target,
            config: &self.config,
        };

        let mut offspring = Population::default();
        while offspring.len() < self.config.population_size {
            let a = self.config.selection.select(parents, rng);
            let b = self.config.selection.select(parents, rng);

            let (c1, c2) = crossover(
                &parents.solutions()[a],
                &parents.solutions()[b],
                self.config.crossover_rate,
                rng,
            );

            for mut child in [c1, c2] {
                if offspring.len() >= self.config.population_size {
                    break;
                }

                if rng.gen_range(0.0..1.0) < self.config.mutation_rate {
                    if let Some(mutated) = mutate_random(&child, &ctx, rng) {
                        child = mutated;
                    }
                }

                if !child.is_valid(
                    self.config.min_foods,
                    self.config.max_foods,
                    self.config.require_staple,
                ) {
                    child = random_solution(&self.catalog, &self.config, rng)?;
                }

                offspring.push(child);
            }
        }
        Ok(offspring)
    }

    /// Elitist replacement: whole fronts in rank order, then the
    /// overflow front by descending crowding distance.
    fn truncate(&self, population: Population, fronts: &[Vec<usize>]) -> Population {
        let size = self.config.population_size;
        let solutions = population.into_solutions();
        let mut next = Vec::with_capacity(size);

        for front in fronts {
            if next.len() + front.len() <= size {
                next.extend(front.iter().map(|&i| solutions[i].clone()));
                if next.len() == size {
                    break;
                }
            } else {
                let mut overflow: Vec<usize> = front.clone();
                overflow.sort_by(|&a, &b| {
                    solutions[b]
                        .crowding
                        .partial_cmp(&solutions[a].crowding)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                for &i in overflow.iter().take(size - next.len()) {
                    next.push(solutions[i].clone());
                }
                break;
            }
        }

        Population::new(next)
    }

    /// Good-enough early termination: a large enough first front whose
    /// every member passes all hard constraints and clears the aggregate
    /// weighted-score threshold.
    fn good_enough(&self, population: &Population) -> bool {
        let front1 = population.front(1);
        front1.len() >= self.config.min_pareto_solutions
            && front1.iter().all(|s| {
                s.meets_hard_constraints() && s.weighted_score() >= AGGREGATE_SCORE_THRESHOLD
            })
    }
}
