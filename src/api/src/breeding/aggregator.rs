//! Score aggregation: role scores plus bonuses into a capped total with a
//! confidence rating and summary.

use serde::{Deserialize, Serialize};

use crate::breeding::bonus::BonusResult;
use crate::breeding::context::ScoreContext;
use crate::breeding::extractor::LIGHTLY_RACED_LIMIT;
use crate::breeding::profiles::{DamProfile, DamsireProfile, SireProfile, Tier};
use crate::breeding::tier_scorer::TierScore;

/// Ceiling on the breeding total. A clamp, not a rescale.
pub const GLOBAL_CAP: u32 = 60;

/// How much of the pedigree was recognized, not how good it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    None,
}

impl Confidence {
    pub fn from_recognized(count: usize) -> Self {
        match count {
            3.. => Confidence::High,
            2 => Confidence::Medium,
            1 => Confidence::Low,
            _ => Confidence::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sire: u32,
    pub dam: u32,
    pub damsire: u32,
    pub bonuses: BonusResult,
}

/// Result of one scoring call. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingScore {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    pub confidence: Confidence,
    pub summary: String,
    pub was_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_applied_reason: Option<String>,
}

impl BreedingScore {
    /// The result for a horse with enough starts that pedigree is ignored.
    pub fn not_applicable(lifetime_starts: u32) -> Self {
        Self {
            total: 0,
            breakdown: ScoreBreakdown::default(),
            confidence: Confidence::None,
            summary: "Breeding not applied".to_string(),
            was_applied: false,
            not_applied_reason: Some(format!(
                "Horse has {} lifetime starts; breeding analysis only applies below {} starts",
                lifetime_starts, LIGHTLY_RACED_LIMIT
            )),
        }
    }

    #[cfg(test)]
    pub(crate) fn applied_for_test(total: u32) -> Self {
        Self {
            total,
            breakdown: ScoreBreakdown::default(),
            confidence: Confidence::None,
            summary: score_band(total).to_string(),
            was_applied: true,
            not_applied_reason: None,
        }
    }
}

impl AsRef<BreedingScore> for BreedingScore {
    fn as_ref(&self) -> &BreedingScore {
        self
    }
}

/// Descriptive band for a total.
pub fn score_band(total: u32) -> &'static str {
    match total {
        50.. => "exceptional",
        40..=49 => "strong",
        30..=39 => "above average",
        20..=29 => "average",
        10..=19 => "below average",
        _ => "limited data",
    }
}

fn summarize(total: u32, sire: Option<&SireProfile>, context: &ScoreContext) -> String {
    let band = score_band(total);
    match sire {
        Some(s) if context.is_debut && s.tier == Tier::Elite => format!(
            "First-time starter by elite sire {}: {} pedigree ({} pts)",
            s.name, band, total
        ),
        _ if band == "limited data" => format!("Limited pedigree data ({} pts)", total),
        _ => {
            let mut text = format!("{} pedigree ({} pts)", band, total);
            if let Some(first) = text.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            text
        }
    }
}

/// Combine tier scores and bonuses. The caller has already applied the
/// lifetime-starts gate.
pub fn aggregate(
    sire: &TierScore<'_, SireProfile>,
    dam: &TierScore<'_, DamProfile>,
    damsire: &TierScore<'_, DamsireProfile>,
    bonuses: BonusResult,
    context: &ScoreContext,
) -> BreedingScore {
    let raw = sire.score + dam.score + damsire.score + bonuses.total();
    let total = raw.min(GLOBAL_CAP);

    let recognized = [
        sire.is_recognized(),
        dam.is_recognized(),
        damsire.is_recognized(),
    ]
    .iter()
    .filter(|known| **known)
    .count();

    BreedingScore {
        total,
        summary: summarize(total, sire.profile, context),
        breakdown: ScoreBreakdown {
            sire: sire.score,
            dam: dam.score,
            damsire: damsire.score,
            bonuses,
        },
        confidence: Confidence::from_recognized(recognized),
        was_applied: true,
        not_applied_reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding::profiles::{DistanceCategory, Surface};

    fn ctx(is_debut: bool) -> ScoreContext {
        ScoreContext {
            surface: Surface::Dirt,
            distance_category: DistanceCategory::Sprint,
            is_debut,
        }
    }

    fn unknown<'a, P>(score: u32) -> TierScore<'a, P> {
        TierScore {
            score,
            profile: None,
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_confidence_from_recognized() {
        assert_eq!(Confidence::from_recognized(3), Confidence::High);
        assert_eq!(Confidence::from_recognized(2), Confidence::Medium);
        assert_eq!(Confidence::from_recognized(1), Confidence::Low);
        assert_eq!(Confidence::from_recognized(0), Confidence::None);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(score_band(60), "exceptional");
        assert_eq!(score_band(50), "exceptional");
        assert_eq!(score_band(49), "strong");
        assert_eq!(score_band(30), "above average");
        assert_eq!(score_band(20), "average");
        assert_eq!(score_band(10), "below average");
        assert_eq!(score_band(9), "limited data");
    }

    #[test]
    fn test_all_unknown_baseline() {
        let result = aggregate(
            &unknown::<SireProfile>(5),
            &unknown::<DamProfile>(5),
            &unknown::<DamsireProfile>(5),
            BonusResult::default(),
            &ctx(false),
        );
        assert_eq!(result.total, 15);
        assert_eq!(result.confidence, Confidence::None);
        assert_eq!(result.summary, "Below average pedigree (15 pts)");
        assert!(result.was_applied);
    }

    #[test]
    fn test_total_is_clamped() {
        let bonuses = BonusResult {
            elite_sire_debut: 10,
            surface_fit: 5,
            distance_fit: 5,
            reasons: Vec::new(),
        };
        let result = aggregate(
            &unknown::<SireProfile>(25),
            &unknown::<DamProfile>(20),
            &unknown::<DamsireProfile>(15),
            bonuses,
            &ctx(false),
        );
        assert_eq!(result.total, GLOBAL_CAP);
        // Breakdown keeps the unclamped components
        assert_eq!(result.breakdown.sire, 25);
        assert_eq!(result.breakdown.bonuses.total(), 20);
    }

    #[test]
    fn test_not_applicable() {
        let result = BreedingScore::not_applicable(8);
        assert_eq!(result.total, 0);
        assert!(!result.was_applied);
        let reason = result.not_applied_reason.unwrap();
        assert!(reason.contains("8 lifetime starts"));
        assert!(reason.contains("below 8 starts"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(BreedingScore::not_applicable(12)).unwrap();
        assert_eq!(json["confidence"], "none");
        assert_eq!(json["was_applied"], false);
        assert!(json["not_applied_reason"].is_string());

        let applied = serde_json::to_value(BreedingScore::applied_for_test(30)).unwrap();
        assert!(applied.get("not_applied_reason").is_none());
    }
}
