use crate::genetics::solution::Solution;
use crate::models::{MealTarget, Nutrient};
use crate::optimizer::outcome::ParetoOutcome;

/// Display the final front in a formatted report.
pub fn display_outcome(outcome: &ParetoOutcome, target: &MealTarget) {
    println!();
    if outcome.is_verified() {
        println!(
            "=== Pareto Front ({} solutions, all nutrient bands satisfied) ===",
            outcome.len()
        );
    } else {
        println!(
            "=== Best-Effort Front ({} closest solutions; no candidate satisfied every band) ===",
            outcome.len()
        );
    }

    for (i, solution) in outcome.solutions().iter().enumerate() {
        println!();
        println!("--- Solution {} ---", i + 1);
        display_solution(solution, target);
    }
}

/// Display one solution: its genes, totals against target, and the
/// objective score breakdown.
pub fn display_solution(solution: &Solution, target: &MealTarget) {
    let max_name_len = solution
        .genes()
        .iter()
        .map(|g| g.food.name.len())
        .max()
        .unwrap_or(10);

    for gene in solution.genes() {
        let staple_tag = if gene.is_staple() { "  [staple]" } else { "" };
        println!(
            "  {:<width$}  {:>4} g - {:>5.0} cal{}",
            gene.food.name,
            gene.intake_g,
            gene.calories(),
            staple_tag,
            width = max_name_len
        );
    }

    println!();
    println!("  Nutrient totals (actual / target):");
    for n in Nutrient::ALL {
        let target_value = target.nutrients.get(n);
        if target_value == 0.0 {
            continue;
        }
        let actual = solution.total().get(n);
        println!(
            "    {:<11} {:>8.1} / {:>8.1}  ({:>5.1}%)",
            n.name(),
            actual,
            target_value,
            actual / target_value * 100.0
        );
    }

    println!();
    println!("  Objective scores (weighted mean {:.3}):", solution.weighted_score());
    for score in &solution.scores {
        let hard_tag = if score.is_hard { " [hard]" } else { "" };
        println!("    {:<11} {:.3}{}", score.name, score.value, hard_tag);
    }
}
