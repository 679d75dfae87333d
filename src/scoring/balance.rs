use crate::genetics::solution::Solution;
use crate::models::MealTarget;
use crate::scoring::constants::{
    BALANCE_CALORIE_WEIGHT, BALANCE_INTAKE_WEIGHT, BALANCE_MACRO_WEIGHT,
};

/// Balance score of a solution, in [0, 1].
///
/// Blends the macro-calorie split against the health-condition-derived
/// ideal, how close each food sits to its category's default intake, and
/// how close the total calories are to target.
pub fn balance_score(solution: &Solution, target: &MealTarget) -> f64 {
    if solution.is_empty() {
        return 0.0;
    }

    BALANCE_MACRO_WEIGHT * macro_split_closeness(solution, target)
        + BALANCE_INTAKE_WEIGHT * intake_default_closeness(solution)
        + BALANCE_CALORIE_WEIGHT * calorie_closeness(solution, target)
}

/// 1 minus the total variation between the actual calorie split and the
/// ideal one.
fn macro_split_closeness(solution: &Solution, target: &MealTarget) -> f64 {
    let (carb_cal, protein_cal, fat_cal) = solution.total().macro_calories();
    let macro_total = carb_cal + protein_cal + fat_cal;
    if macro_total <= 0.0 {
        return 0.0;
    }

    let split = target.macro_split;
    let variation = (carb_cal / macro_total - split.carbs).abs()
        + (protein_cal / macro_total - split.protein).abs()
        + (fat_cal / macro_total - split.fat).abs();

    (1.0 - variation / 2.0).clamp(0.0, 1.0)
}

/// Mean closeness of each gene's intake to its category default,
/// normalized inside the range.
fn intake_default_closeness(solution: &Solution) -> f64 {
    let sum: f64 = solution
        .genes()
        .iter()
        .map(|g| {
            let range = g.intake_range();
            let span = range.span();
            if span == 0 {
                return 1.0;
            }
            1.0 - (g.intake_g as f64 - range.default_g as f64).abs() / span as f64
        })
        .sum();
    (sum / solution.len() as f64).clamp(0.0, 1.0)
}

/// Closeness of total calories to target; 0 at a 100% miss.
fn calorie_closeness(solution: &Solution, target: &MealTarget) -> f64 {
    let target_cal = target.nutrients.calories;
    if target_cal == 0.0 {
        return if solution.total().calories == 0.0 { 1.0 } else { 0.0 };
    }
    let relative_miss = (solution.total().calories - target_cal).abs() / target_cal;
    (1.0 - relative_miss).max(0.0)
}
