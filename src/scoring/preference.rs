use strsim::jaro_winkler;

use crate::genetics::gene::Gene;
use crate::genetics::solution::Solution;
use crate::models::UserProfile;

/// Penalty and bonus magnitudes for preference scoring.
///
/// Passed in explicitly at construction rather than read from any global
/// table, so two evaluators can carry different factors side by side.
#[derive(Debug, Clone)]
pub struct PreferenceFactors {
    /// Severe: eating an allergen is close to disqualifying.
    pub allergen_penalty: f64,

    /// Severe: religious violations weigh like allergens.
    pub religious_penalty: f64,

    pub dislike_penalty: f64,

    /// Applied when a food's spice level exceeds the tolerance.
    pub spice_penalty: f64,

    /// Added once per matched liked flavor.
    pub flavor_bonus: f64,

    /// The solution average is multiplied by this per severe violation.
    pub severe_decay: f64,

    /// Jaro-Winkler similarity at or above which two names match.
    pub name_match_threshold: f64,
}

impl Default for PreferenceFactors {
    fn default() -> Self {
        Self {
            allergen_penalty: 0.8,
            religious_penalty: 0.8,
            dislike_penalty: 0.3,
            spice_penalty: 0.2,
            flavor_bonus: 0.05,
            severe_decay: 0.5,
            name_match_threshold: 0.88,
        }
    }
}

fn matches_any(needle: &str, haystack: &[String], threshold: f64) -> bool {
    let needle = needle.to_lowercase();
    haystack
        .iter()
        .any(|h| jaro_winkler(&h.to_lowercase(), &needle) >= threshold)
}

/// Score one gene's food against the profile, plus its count of severe
/// (allergen/religious) violations.
fn score_gene(gene: &Gene, profile: &UserProfile, factors: &PreferenceFactors) -> (f64, usize) {
    let tags = &gene.food.tags;
    let mut score = 1.0;
    let mut severe = 0;

    if tags
        .allergens
        .iter()
        .any(|a| matches_any(a, &profile.allergens, factors.name_match_threshold))
    {
        score -= factors.allergen_penalty;
        severe += 1;
    }

    if tags
        .religious
        .iter()
        .any(|r| matches_any(r, &profile.religious_restrictions, factors.name_match_threshold))
    {
        score -= factors.religious_penalty;
        severe += 1;
    }

    if matches_any(&gene.food.name, &profile.dislikes, factors.name_match_threshold) {
        score -= factors.dislike_penalty;
    }

    if tags.spice_level > profile.spice_tolerance {
        score -= factors.spice_penalty;
    }

    let matched_flavors = tags
        .flavors
        .iter()
        .filter(|f| matches_any(f, &profile.flavor_likes, factors.name_match_threshold))
        .count();
    score += matched_flavors as f64 * factors.flavor_bonus;

    (score.clamp(0.0, 1.0), severe)
}

/// Preference score of a whole solution, in [0, 1].
///
/// Per-gene scores are averaged, then the average is halved once per
/// severe violation so a single allergen hit drags down an otherwise
/// pleasant meal.
pub fn preference_score(
    solution: &Solution,
    profile: &UserProfile,
    factors: &PreferenceFactors,
) -> f64 {
    if solution.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut severe_total = 0usize;
    for gene in solution.genes() {
        let (score, severe) = score_gene(gene, profile, factors);
        sum += score;
        severe_total += severe;
    }

    let average = sum / solution.len() as f64;
    (average * factors.severe_decay.powi(severe_total as i32)).clamp(0.0, 1.0)
}
