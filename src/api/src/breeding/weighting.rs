//! Experience weighting: how much of the pedigree score a horse keeps as it
//! accumulates starts.

use serde::Serialize;

use crate::breeding::aggregator::BreedingScore;

/// Blend weight by exact lifetime start count. Not interpolated.
const EXPERIENCE_WEIGHTS: [f64; 8] = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3];

/// Weight in `[0.0, 1.0]` for a start count; zero from 8 starts on.
pub fn experience_weight(lifetime_starts: u32) -> f64 {
    EXPERIENCE_WEIGHTS
        .get(lifetime_starts as usize)
        .copied()
        .unwrap_or(0.0)
}

/// Points a breeding total adds to an overall handicap score. Rounds once,
/// here, and nowhere earlier.
pub fn weighted_contribution(total: u32, lifetime_starts: u32) -> u32 {
    (total as f64 * experience_weight(lifetime_starts)).round() as u32
}

/// A handicap score with the pedigree contribution folded in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlendedScore {
    pub base: i64,
    pub weight: f64,
    pub breeding_contribution: u32,
    pub total: i64,
}

/// Fold a breeding score into an existing handicap score.
pub fn blend_into_handicap(base: i64, breeding: &BreedingScore, lifetime_starts: u32) -> BlendedScore {
    let weight = experience_weight(lifetime_starts);
    let breeding_contribution = if breeding.was_applied {
        weighted_contribution(breeding.total, lifetime_starts)
    } else {
        0
    };
    BlendedScore {
        base,
        weight,
        breeding_contribution,
        total: base + breeding_contribution as i64,
    }
}
