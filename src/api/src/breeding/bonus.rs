//! Contextual bonuses from the sire (and, failing that, the damsire).
//!
//! Dams never contribute a bonus. The damsire surface fallback only applies
//! when no sire profile is known.

use serde::{Deserialize, Serialize};

use crate::breeding::context::ScoreContext;
use crate::breeding::profiles::{DamsireProfile, SireProfile, Tier};

pub const ELITE_SIRE_DEBUT_BONUS: u32 = 10;
pub const SURFACE_FIT_BONUS: u32 = 5;
pub const DAMSIRE_SURFACE_FIT_BONUS: u32 = 3;
pub const DISTANCE_FIT_BONUS: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResult {
    pub elite_sire_debut: u32,
    pub surface_fit: u32,
    pub distance_fit: u32,
    /// One entry per awarded bonus, in evaluation order.
    pub reasons: Vec<String>,
}

impl BonusResult {
    pub fn total(&self) -> u32 {
        self.elite_sire_debut + self.surface_fit + self.distance_fit
    }
}

/// Evaluate elite-sire-debut, surface fit and distance fit, in that order.
pub fn calculate_bonuses(
    sire: Option<&SireProfile>,
    damsire: Option<&DamsireProfile>,
    context: &ScoreContext,
) -> BonusResult {
    let mut result = BonusResult::default();

    // Hard tier gate: a near-elite sire gets nothing here.
    if let Some(s) = sire.filter(|s| context.is_debut && s.tier == Tier::Elite) {
        result.elite_sire_debut = ELITE_SIRE_DEBUT_BONUS;
        result.reasons.push(format!(
            "Debut runner by elite sire {} (+{})",
            s.name, ELITE_SIRE_DEBUT_BONUS
        ));
    }

    match (sire, damsire) {
        (Some(s), _) => {
            if s.surface.is_concrete() && s.surface == context.surface {
                result.surface_fit = SURFACE_FIT_BONUS;
                result.reasons.push(format!(
                    "Sire {} suits {} (+{})",
                    s.name,
                    context.surface.as_str(),
                    SURFACE_FIT_BONUS
                ));
            }
        }
        (None, Some(ds)) => {
            if ds.surface.is_concrete() && ds.surface == context.surface {
                result.surface_fit = DAMSIRE_SURFACE_FIT_BONUS;
                result.reasons.push(format!(
                    "Damsire {} passes on {} ability (+{})",
                    ds.name,
                    context.surface.as_str(),
                    DAMSIRE_SURFACE_FIT_BONUS
                ));
            }
        }
        (None, None) => {}
    }

    if let Some(s) = sire {
        if s.distance.is_concrete() && s.distance == context.distance_category {
            result.distance_fit = DISTANCE_FIT_BONUS;
            result.reasons.push(format!(
                "Sire {} suits {} trips (+{})",
                s.name,
                context.distance_category.as_str(),
                DISTANCE_FIT_BONUS
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breeding::profiles::{DistanceCategory, Surface};
    use crate::breeding::stores::stores;

    fn ctx(surface: Surface, distance: DistanceCategory, is_debut: bool) -> ScoreContext {
        ScoreContext {
            surface,
            distance_category: distance,
            is_debut,
        }
    }

    #[test]
    fn test_all_bonuses_for_elite_debut() {
        let sire = stores().sires.get("Into Mischief");
        let result = calculate_bonuses(sire, None, &ctx(Surface::Dirt, DistanceCategory::Sprint, true));
        assert_eq!(result.elite_sire_debut, 10);
        assert_eq!(result.surface_fit, 5);
        assert_eq!(result.distance_fit, 5);
        assert_eq!(result.total(), 20);
        assert_eq!(result.reasons.len(), 3);
        assert!(result.reasons[0].starts_with("Debut runner"));
        assert!(result.reasons[1].contains("suits dirt"));
        assert!(result.reasons[2].contains("sprint trips"));
    }

    #[test]
    fn test_near_elite_sire_gets_no_debut_bonus() {
        // Not This Time is strong tier with a high first-starter rate
        let sire = stores().sires.get("Not This Time");
        let result = calculate_bonuses(sire, None, &ctx(Surface::Dirt, DistanceCategory::Sprint, true));
        assert_eq!(result.elite_sire_debut, 0);
        assert_eq!(result.surface_fit, 5);
    }

    #[test]
    fn test_elite_sire_without_debut() {
        let sire = stores().sires.get("Gun Runner");
        let result = calculate_bonuses(sire, None, &ctx(Surface::Dirt, DistanceCategory::Route, false));
        assert_eq!(result.elite_sire_debut, 0);
        assert_eq!(result.surface_fit, 5);
        // Versatile distance preference never earns distance fit
        assert_eq!(result.distance_fit, 0);
    }

    #[test]
    fn test_surface_mismatch_gets_nothing() {
        let sire = stores().sires.get("English Channel");
        let result = calculate_bonuses(sire, None, &ctx(Surface::Dirt, DistanceCategory::Route, false));
        assert_eq!(result.surface_fit, 0);
        assert_eq!(result.distance_fit, 5);
    }

    #[test]
    fn test_damsire_fallback_only_without_sire() {
        let damsire = stores().damsires.get("Giant's Causeway");
        let context = ctx(Surface::Turf, DistanceCategory::Versatile, false);

        let fallback = calculate_bonuses(None, damsire, &context);
        assert_eq!(fallback.surface_fit, 3);
        assert_eq!(fallback.reasons.len(), 1);

        // A versatile sire blocks the fallback even though he earns nothing
        let sire = stores().sires.get("Candy Ride");
        let blocked = calculate_bonuses(sire, damsire, &context);
        assert_eq!(blocked.surface_fit, 0);
        assert!(blocked.reasons.is_empty());
    }

    #[test]
    fn test_damsire_fallback_requires_surface_match() {
        // Giant's Causeway is a turf influence
        let damsire = stores().damsires.get("Giant's Causeway");
        let result = calculate_bonuses(None, damsire, &ctx(Surface::Dirt, DistanceCategory::Sprint, false));
        assert_eq!(result.surface_fit, 0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_no_profiles_no_bonus() {
        let result = calculate_bonuses(None, None, &ctx(Surface::Dirt, DistanceCategory::Sprint, true));
        assert_eq!(result, BonusResult::default());
    }
}
