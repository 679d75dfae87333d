//! Non-dominated sorting and crowding distance (Deb et al., 2002).
//!
//! Both operate on a [`Population`] whose solutions carry evaluated
//! score vectors. Sorting writes 1-based ranks; crowding writes the
//! per-front diversity distances used to break selection ties.

use crate::genetics::population::Population;
use crate::genetics::solution::UNRANKED;

/// Fast non-dominated sort.
///
/// Assigns every solution a Pareto rank (1 = best front) and returns the
/// fronts as index groups. Any pre-existing ranks are reset first, so the
/// call is safe on merged parent+offspring populations.
///
/// O(N²·M) for N solutions and M objectives.
pub fn non_dominated_sort(population: &mut Population) -> Vec<Vec<usize>> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    for s in population.solutions_mut() {
        s.rank = UNRANKED;
    }

    let solutions = population.solutions();
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];
    let mut first_front = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            if solutions[i].dominates(&solutions[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if solutions[j].dominates(&solutions[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
        if domination_count[i] == 0 {
            first_front.push(i);
        }
    }

    let mut fronts = vec![first_front];
    loop {
        let current = fronts.last().expect("fronts starts non-empty");
        let mut next = Vec::new();
        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        fronts.push(next);
    }

    for (front_idx, front) in fronts.iter().enumerate() {
        for &i in front {
            population.solutions_mut()[i].rank = front_idx + 1;
        }
    }

    fronts
}

/// Crowding distance assignment for every front.
///
/// Fronts of size ≤ 2 get +∞ for all members. Otherwise, per objective:
/// the front is sorted by that objective, the two boundary members get
/// +∞, and interior members accumulate `(next − prev) / (max − min)`;
/// an objective whose values are all equal contributes nothing.
pub fn assign_crowding_distance(population: &mut Population, fronts: &[Vec<usize>]) {
    for s in population.solutions_mut() {
        s.crowding = 0.0;
    }

    for front in fronts {
        if front.len() <= 2 {
            for &i in front {
                population.solutions_mut()[i].crowding = f64::INFINITY;
            }
            continue;
        }

        let objective_count = population.solutions()[front[0]].scores.len();
        for obj in 0..objective_count {
            let mut ordered = front.clone();
            {
                let solutions = population.solutions();
                ordered.sort_by(|&a, &b| {
                    solutions[a].scores[obj]
                        .value
                        .partial_cmp(&solutions[b].scores[obj].value)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }

            let min_val = population.solutions()[ordered[0]].scores[obj].value;
            let max_val = population.solutions()[*ordered.last().expect("front len > 2")].scores
                [obj]
                .value;
            let range = max_val - min_val;

            population.solutions_mut()[ordered[0]].crowding = f64::INFINITY;
            population.solutions_mut()[*ordered.last().expect("front len > 2")].crowding =
                f64::INFINITY;

            if range <= 0.0 {
                continue;
            }

            for w in 1..(ordered.len() - 1) {
                let prev = population.solutions()[ordered[w - 1]].scores[obj].value;
                let next = population.solutions()[ordered[w + 1]].scores[obj].value;
                let s = &mut population.solutions_mut()[ordered[w]];
                if s.crowding.is_finite() {
                    s.crowding += (next - prev) / range;
                }
            }
        }
    }
}
