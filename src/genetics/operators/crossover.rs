use std::collections::HashSet;

use rand::Rng;

use crate::genetics::gene::Gene;
use crate::genetics::solution::Solution;

/// Staple-preserving single-point crossover.
///
/// Below `crossover_rate` the parents are cloned unchanged. Otherwise
/// each parent's genes are split staple/non-staple; each child receives
/// exactly one staple gene (a coin flip between the parents, or the sole
/// available one), and the non-staples recombine at a single point with
/// an independently drawn cut per parent. Duplicate foods are stripped
/// afterward keeping the first occurrence.
pub fn crossover(
    a: &Solution,
    b: &Solution,
    crossover_rate: f64,
    rng: &mut impl Rng,
) -> (Solution, Solution) {
    if rng.gen_range(0.0..1.0) >= crossover_rate {
        return (a.clone(), b.clone());
    }

    let (staples_a, rest_a) = split_staples(a);
    let (staples_b, rest_b) = split_staples(b);

    let cut_a = rng.gen_range(0..=rest_a.len());
    let cut_b = rng.gen_range(0..=rest_b.len());

    let child1_rest: Vec<Gene> = rest_a[..cut_a]
        .iter()
        .chain(rest_b[cut_b..].iter())
        .cloned()
        .collect();
    let child2_rest: Vec<Gene> = rest_b[..cut_b]
        .iter()
        .chain(rest_a[cut_a..].iter())
        .cloned()
        .collect();

    let child1 = assemble(pick_staple(&staples_a, &staples_b, rng), child1_rest);
    let child2 = assemble(pick_staple(&staples_a, &staples_b, rng), child2_rest);

    (child1, child2)
}

fn split_staples(solution: &Solution) -> (Vec<Gene>, Vec<Gene>) {
    solution
        .genes()
        .iter()
        .cloned()
        .partition(Gene::is_staple)
}

/// Coin-flip between the parents' staples; falls back to whichever
/// parent has one.
fn pick_staple(staples_a: &[Gene], staples_b: &[Gene], rng: &mut impl Rng) -> Option<Gene> {
    match (staples_a.first(), staples_b.first()) {
        (Some(sa), Some(sb)) => Some(if rng.gen_bool(0.5) { sa.clone() } else { sb.clone() }),
        (Some(sa), None) => Some(sa.clone()),
        (None, Some(sb)) => Some(sb.clone()),
        (None, None) => None,
    }
}

/// Staple first, then non-staples with duplicates stripped
/// (first occurrence kept).
fn assemble(staple: Option<Gene>, rest: Vec<Gene>) -> Solution {
    let mut seen = HashSet::new();
    let mut genes = Vec::with_capacity(rest.len() + 1);

    if let Some(s) = staple {
        seen.insert(s.key());
        genes.push(s);
    }
    for gene in rest {
        if seen.insert(gene.key()) {
            genes.push(gene);
        }
    }

    Solution::new(genes)
}
