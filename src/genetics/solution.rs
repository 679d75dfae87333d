use std::collections::HashSet;

use serde::Serialize;

use crate::genetics::gene::Gene;
use crate::models::NutrientVector;

/// Rank value meaning "not ranked yet"; front numbering starts at 1.
pub const UNRANKED: usize = 0;

/// One entry of a solution's objective score vector.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveScore {
    pub name: String,

    /// Score in [0, 1]; higher is better.
    pub value: f64,

    /// Weight used by aggregate scoring and the deviation fallback.
    pub weight: f64,

    /// Whether this objective is a hard constraint.
    pub is_hard: bool,

    /// Minimum score a hard constraint must reach; only consulted by the
    /// good-enough termination check, never by Pareto ranking.
    pub hard_threshold: f64,
}

/// One candidate meal: an ordered, food-name-unique list of genes with
/// its cached nutrient total and NSGA-II bookkeeping.
///
/// Solutions are immutable with respect to genes. The `with_*` builders
/// return a fresh solution whose total is recomputed, so a stale cache
/// cannot exist. Rank, crowding distance and scores are annotations the
/// engine writes after evaluation and sorting.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    genes: Vec<Gene>,
    total: NutrientVector,

    /// Pareto rank; 0 = unranked, 1 = best front.
    #[serde(skip)]
    pub rank: usize,

    /// Crowding distance within the solution's front; +∞ at boundaries.
    #[serde(skip)]
    pub crowding: f64,

    pub scores: Vec<ObjectiveScore>,
}

impl Solution {
    pub fn new(genes: Vec<Gene>) -> Self {
        let total = compute_total(&genes);
        Self {
            genes,
            total,
            rank: UNRANKED,
            crowding: 0.0,
            scores: Vec::new(),
        }
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached total nutrients across all genes.
    pub fn total(&self) -> &NutrientVector {
        &self.total
    }

    pub fn has_food(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.genes.iter().any(|g| g.key() == key)
    }

    pub fn staple_count(&self) -> usize {
        self.genes.iter().filter(|g| g.is_staple()).count()
    }

    /// Fresh solution with one gene appended. The caller ensures the
    /// food is not already present.
    pub fn with_gene(&self, gene: Gene) -> Self {
        debug_assert!(!self.has_food(&gene.food.name), "duplicate food in solution");
        let mut genes = self.genes.clone();
        genes.push(gene);
        Self::new(genes)
    }

    /// Fresh solution with the gene at `index` set to a new intake.
    pub fn with_intake(&self, index: usize, intake_g: u32) -> Self {
        let mut genes = self.genes.clone();
        genes[index] = genes[index].with_intake(intake_g);
        Self::new(genes)
    }

    /// Fresh solution with the gene at `index` replaced.
    pub fn with_replaced(&self, index: usize, gene: Gene) -> Self {
        let mut genes = self.genes.clone();
        genes[index] = gene;
        Self::new(genes)
    }

    /// Fresh solution without the gene at `index`.
    pub fn without_gene(&self, index: usize) -> Self {
        let mut genes = self.genes.clone();
        genes.remove(index);
        Self::new(genes)
    }

    /// Structural validity: gene count inside [min_foods, max_foods],
    /// unique food names, every intake in range, and exactly one staple
    /// when one is required.
    pub fn is_valid(&self, min_foods: usize, max_foods: usize, require_staple: bool) -> bool {
        if self.genes.len() < min_foods || self.genes.len() > max_foods {
            return false;
        }
        if !self.genes.iter().all(Gene::in_range) {
            return false;
        }
        let mut seen = HashSet::new();
        if !self.genes.iter().all(|g| seen.insert(g.key())) {
            return false;
        }
        if require_staple && self.staple_count() != 1 {
            return false;
        }
        true
    }

    /// Pareto dominance over matching score vectors: every score at least
    /// as good and at least one strictly better. Equal vectors dominate
    /// nothing. Maximization throughout.
    pub fn dominates(&self, other: &Self) -> bool {
        debug_assert_eq!(
            self.scores.len(),
            other.scores.len(),
            "score vectors must match in length"
        );
        debug_assert!(
            self.scores
                .iter()
                .zip(&other.scores)
                .all(|(a, b)| a.name == b.name),
            "score vectors must match in order"
        );

        let mut strictly_better = false;
        for (a, b) in self.scores.iter().zip(&other.scores) {
            if a.value < b.value {
                return false;
            }
            if a.value > b.value {
                strictly_better = true;
            }
        }
        strictly_better
    }

    /// Weighted mean of objective scores, in [0, 1].
    pub fn weighted_score(&self) -> f64 {
        let total_weight: f64 = self.scores.iter().map(|s| s.weight).sum();
        if total_weight == 0.0 {
            return 0.0;
        }
        self.scores.iter().map(|s| s.value * s.weight).sum::<f64>() / total_weight
    }

    /// Whether every hard-constrained objective reaches its threshold.
    pub fn meets_hard_constraints(&self) -> bool {
        self.scores
            .iter()
            .filter(|s| s.is_hard)
            .all(|s| s.value >= s.hard_threshold)
    }
}

fn compute_total(genes: &[Gene]) -> NutrientVector {
    genes
        .iter()
        .fold(NutrientVector::default(), |acc, g| acc.add(&g.nutrients()))
}
