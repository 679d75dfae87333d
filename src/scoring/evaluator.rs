use rayon::prelude::*;

use crate::genetics::solution::{ObjectiveScore, Solution};
use crate::models::{MealTarget, Nutrient, UserProfile};
use crate::scoring::balance::balance_score;
use crate::scoring::constants::{BALANCE_WEIGHT, DIVERSITY_WEIGHT, PREFERENCE_WEIGHT};
use crate::scoring::diversity::diversity_score;
use crate::scoring::nutrient::score_actual;
use crate::scoring::preference::{preference_score, PreferenceFactors};

/// One scoring strategy: a pure function of a solution and the target.
pub trait Objective: Send + Sync {
    fn name(&self) -> &str;

    /// Score in [0, 1]; higher is better.
    fn evaluate(&self, solution: &Solution, target: &MealTarget) -> f64;
}

struct NutrientObjective {
    nutrient: Nutrient,
}

impl Objective for NutrientObjective {
    fn name(&self) -> &str {
        self.nutrient.name()
    }

    fn evaluate(&self, solution: &Solution, target: &MealTarget) -> f64 {
        score_actual(
            self.nutrient,
            solution.total().get(self.nutrient),
            target.nutrients.get(self.nutrient),
            &target.bands.get(self.nutrient),
        )
    }
}

struct PreferenceObjective {
    profile: UserProfile,
    factors: PreferenceFactors,
}

impl Objective for PreferenceObjective {
    fn name(&self) -> &str {
        "preference"
    }

    fn evaluate(&self, solution: &Solution, _target: &MealTarget) -> f64 {
        preference_score(solution, &self.profile, &self.factors)
    }
}

struct DiversityObjective;

impl Objective for DiversityObjective {
    fn name(&self) -> &str {
        "diversity"
    }

    fn evaluate(&self, solution: &Solution, _target: &MealTarget) -> f64 {
        diversity_score(solution)
    }
}

struct BalanceObjective;

impl Objective for BalanceObjective {
    fn name(&self) -> &str {
        "balance"
    }

    fn evaluate(&self, solution: &Solution, target: &MealTarget) -> f64 {
        balance_score(solution, target)
    }
}

/// An objective plus the metadata that lands in each score entry.
struct ObjectiveSlot {
    objective: Box<dyn Objective>,
    weight: f64,
    is_hard: bool,
    hard_threshold: f64,
}

/// Composes the objective strategies and writes score vectors.
///
/// Nutrient objectives take weight and hard-constraint metadata from the
/// target's bands; the preference/diversity/balance objectives use the
/// crate's constant weights and are never hard.
pub struct MultiObjectiveEvaluator {
    slots: Vec<ObjectiveSlot>,
}

impl MultiObjectiveEvaluator {
    /// The standard objective set: one per tracked nutrient, plus
    /// preference, diversity and balance.
    pub fn standard(target: &MealTarget, profile: UserProfile, factors: PreferenceFactors) -> Self {
        let mut slots: Vec<ObjectiveSlot> = Nutrient::ALL
            .into_iter()
            .map(|nutrient| {
                let band = target.bands.get(nutrient);
                ObjectiveSlot {
                    objective: Box::new(NutrientObjective { nutrient }),
                    weight: band.weight,
                    is_hard: band.hard,
                    hard_threshold: band.hard_threshold,
                }
            })
            .collect();

        slots.push(ObjectiveSlot {
            objective: Box::new(PreferenceObjective { profile, factors }),
            weight: PREFERENCE_WEIGHT,
            is_hard: false,
            hard_threshold: 0.0,
        });
        slots.push(ObjectiveSlot {
            objective: Box::new(DiversityObjective),
            weight: DIVERSITY_WEIGHT,
            is_hard: false,
            hard_threshold: 0.0,
        });
        slots.push(ObjectiveSlot {
            objective: Box::new(BalanceObjective),
            weight: BALANCE_WEIGHT,
            is_hard: false,
            hard_threshold: 0.0,
        });

        Self { slots }
    }

    pub fn objective_count(&self) -> usize {
        self.slots.len()
    }

    /// Evaluate one solution, writing its score vector.
    pub fn evaluate(&self, solution: &mut Solution, target: &MealTarget) {
        solution.scores = self
            .slots
            .iter()
            .map(|slot| ObjectiveScore {
                name: slot.objective.name().to_string(),
                value: slot.objective.evaluate(solution, target),
                weight: slot.weight,
                is_hard: slot.is_hard,
                hard_threshold: slot.hard_threshold,
            })
            .collect();
    }

    /// Evaluate a batch, optionally in parallel.
    ///
    /// Evaluation is a pure function of (solution, target), so the
    /// parallel path is behaviorally identical to the sequential one;
    /// sorting and selection remain sequential either way.
    pub fn evaluate_all(&self, solutions: &mut [Solution], target: &MealTarget, parallel: bool) {
        if parallel {
            solutions
                .par_iter_mut()
                .for_each(|s| self.evaluate(s, target));
        } else {
            for s in solutions.iter_mut() {
                self.evaluate(s, target);
            }
        }
    }
}
