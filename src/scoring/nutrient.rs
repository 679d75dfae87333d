use crate::scoring::constants::{
    BAND_SCORE_CEIL, BAND_SCORE_FLOOR, EXCESS_DECAY, GENTLE_DECAY,
};
use crate::models::{AchievementBand, Nutrient};

/// Score one nutrient's achievement ratio against its band.
///
/// Inside `[min_rate, max_rate]` the score runs 0.8 at the edges to 1.0
/// at the center. Below the band it decays toward 0: quadratically for
/// calories (undereating is the dominant failure mode there), linearly
/// for everything else. Above the band it decays exponentially, steeply
/// for excess-penalized nutrients and gently otherwise.
pub fn score_ratio(nutrient: Nutrient, ratio: f64, band: &AchievementBand) -> f64 {
    if ratio < 0.0 {
        return 0.0;
    }

    if band.contains(ratio) {
        let half_width = (band.max_rate - band.min_rate) / 2.0;
        if half_width <= 0.0 {
            return BAND_SCORE_CEIL;
        }
        let closeness = 1.0 - (ratio - band.center()).abs() / half_width;
        return BAND_SCORE_FLOOR + (BAND_SCORE_CEIL - BAND_SCORE_FLOOR) * closeness;
    }

    if ratio < band.min_rate {
        let progress = ratio / band.min_rate;
        return if nutrient == Nutrient::Calories {
            BAND_SCORE_FLOOR * progress * progress
        } else {
            BAND_SCORE_FLOOR * progress
        };
    }

    let overshoot = ratio - band.max_rate;
    let decay = if nutrient.excess_penalized() {
        EXCESS_DECAY
    } else {
        GENTLE_DECAY
    };
    BAND_SCORE_FLOOR * (-decay * overshoot).exp()
}

/// Achievement ratio with the degenerate target handled: a zero target
/// scores 1.0 when the actual is also zero and 0.0 otherwise, never a
/// fault.
pub fn score_actual(nutrient: Nutrient, actual: f64, target: f64, band: &AchievementBand) -> f64 {
    if target == 0.0 {
        return if actual == 0.0 { 1.0 } else { 0.0 };
    }
    score_ratio(nutrient, actual / target, band)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> AchievementBand {
        AchievementBand::new(0.9, 1.1, 1.0)
    }

    #[test]
    fn test_center_scores_one() {
        let s = score_ratio(Nutrient::Protein, 1.0, &band());
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_edges_score_floor() {
        for edge in [0.9, 1.1] {
            let s = score_ratio(Nutrient::Protein, edge, &band());
            assert!((s - BAND_SCORE_FLOOR).abs() < 1e-9);
        }
    }

    #[test]
    fn test_below_band_decays_toward_zero() {
        let near = score_ratio(Nutrient::Protein, 0.8, &band());
        let far = score_ratio(Nutrient::Protein, 0.3, &band());
        assert!(near < BAND_SCORE_FLOOR);
        assert!(far < near);
        assert!(far > 0.0);
        assert_eq!(score_ratio(Nutrient::Protein, 0.0, &band()), 0.0);
    }

    #[test]
    fn test_calorie_shortfall_decays_faster() {
        let protein = score_ratio(Nutrient::Protein, 0.5, &band());
        let calories = score_ratio(Nutrient::Calories, 0.5, &band());
        assert!(calories < protein);
    }

    #[test]
    fn test_excess_penalized_decays_faster_above_band() {
        let sodium = score_ratio(Nutrient::Sodium, 1.5, &band());
        let iron = score_ratio(Nutrient::Iron, 1.5, &band());
        assert!(sodium < iron);
        assert!(sodium > 0.0);
    }

    #[test]
    fn test_above_band_continuous_at_edge() {
        let at_edge = score_ratio(Nutrient::Iron, 1.1, &band());
        let just_above = score_ratio(Nutrient::Iron, 1.1001, &band());
        assert!((at_edge - just_above).abs() < 0.01);
    }

    #[test]
    fn test_zero_target_degenerate_rule() {
        let b = band();
        assert_eq!(score_actual(Nutrient::Iron, 0.0, 0.0, &b), 1.0);
        assert_eq!(score_actual(Nutrient::Iron, 3.0, 0.0, &b), 0.0);
    }

    #[test]
    fn test_in_band_beats_out_of_band() {
        let b = band();
        let inside = score_ratio(Nutrient::Carbs, 0.95, &b);
        let below = score_ratio(Nutrient::Carbs, 0.85, &b);
        let above = score_ratio(Nutrient::Carbs, 1.15, &b);
        assert!(inside >= BAND_SCORE_FLOOR);
        assert!(below < inside);
        assert!(above < inside);
    }
}
