//! Pedigree profile types: roles, tiers, surfaces and the three profile
//! variants stored in the reference tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::BreedingError;

/// Pedigree role of an individual relative to the horse being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Sire,
    Dam,
    Damsire,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Sire, Role::Dam, Role::Damsire];

    /// Maximum points a single role may contribute.
    pub const fn ceiling(self) -> u32 {
        match self {
            Role::Sire => 25,
            Role::Dam => 20,
            Role::Damsire => 15,
        }
    }

    /// Base-score band a tier must fall in for this role.
    pub fn tier_band(self, tier: Tier) -> RangeInclusive<u32> {
        match (self, tier) {
            (Role::Sire, Tier::Elite) => 20..=25,
            (Role::Sire, Tier::Strong) => 15..=19,
            (Role::Sire, Tier::Average) => 10..=14,
            (Role::Sire, Tier::BelowAverage) => 0..=9,
            (Role::Dam, Tier::Elite) => 16..=20,
            (Role::Dam, Tier::Strong) => 12..=15,
            (Role::Dam, Tier::Average) => 8..=11,
            (Role::Dam, Tier::BelowAverage) => 0..=7,
            (Role::Damsire, Tier::Elite) => 12..=15,
            (Role::Damsire, Tier::Strong) => 9..=11,
            (Role::Damsire, Tier::Average) => 6..=8,
            (Role::Damsire, Tier::BelowAverage) => 0..=5,
        }
    }

    /// Display label for a tier; dams use "Good" for the second tier.
    pub fn tier_label(self, tier: Tier) -> &'static str {
        match (self, tier) {
            (_, Tier::Elite) => "Elite",
            (Role::Dam, Tier::Strong) => "Good",
            (_, Tier::Strong) => "Strong",
            (_, Tier::Average) => "Average",
            (_, Tier::BelowAverage) => "Below Avg",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Sire => "sire",
            Role::Dam => "dam",
            Role::Damsire => "damsire",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BreedingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sire" => Ok(Role::Sire),
            "dam" => Ok(Role::Dam),
            "damsire" | "broodmare_sire" | "broodmare-sire" | "bms" => Ok(Role::Damsire),
            _ => Err(BreedingError::UnknownRole(s.to_string())),
        }
    }
}

/// Ordered quality classification. Declaration order gives the ordering,
/// so `Tier::Elite > Tier::Strong > Tier::Average > Tier::BelowAverage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    BelowAverage,
    Average,
    #[serde(alias = "good")]
    Strong,
    Elite,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Elite, Tier::Strong, Tier::Average, Tier::BelowAverage];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Elite => "elite",
            Tier::Strong => "strong",
            Tier::Average => "average",
            Tier::BelowAverage => "below_average",
        }
    }

    /// Badge color used by presentation layers.
    pub fn badge_color(self) -> &'static str {
        match self {
            Tier::Elite => "#D4AF37",
            Tier::Strong => "#2E7D32",
            Tier::Average => "#1565C0",
            Tier::BelowAverage => "#757575",
        }
    }
}

/// Racing surface, used both for race context and for profile preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Dirt,
    Turf,
    Synthetic,
    Versatile,
    Unknown,
}

impl Surface {
    /// True for an actual racing surface rather than a non-preference.
    pub fn is_concrete(self) -> bool {
        matches!(self, Surface::Dirt | Surface::Turf | Surface::Synthetic)
    }

    /// Dirt against turf (either way round). Synthetic is never a direct
    /// mismatch.
    pub fn is_direct_mismatch(self, other: Surface) -> bool {
        matches!(
            (self, other),
            (Surface::Dirt, Surface::Turf) | (Surface::Turf, Surface::Dirt)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Dirt => "dirt",
            Surface::Turf => "turf",
            Surface::Synthetic => "synthetic",
            Surface::Versatile => "versatile",
            Surface::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceCategory {
    Sprint,
    Route,
    Versatile,
}

impl DistanceCategory {
    pub fn is_concrete(self) -> bool {
        !matches!(self, DistanceCategory::Versatile)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DistanceCategory::Sprint => "sprint",
            DistanceCategory::Route => "route",
            DistanceCategory::Versatile => "versatile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaminaInfluence {
    High,
    Moderate,
    Low,
}

/// Common view over the three profile variants, used by the generic
/// reference store.
pub trait PedigreeProfile {
    const ROLE: Role;

    fn name(&self) -> &str;
    fn tier(&self) -> Tier;
    fn base_score(&self) -> u32;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SireProfile {
    pub name: String,
    pub tier: Tier,
    pub base_score: u32,
    pub surface: Surface,
    pub distance: DistanceCategory,
    /// Preferred distance range in furlongs, inclusive.
    pub optimal_furlongs: [f64; 2],
    /// Percentage (0-100) of first-time starters that won.
    pub first_starter_win_pct: f64,
    #[serde(default)]
    pub stakes_winners: u32,
}

impl PedigreeProfile for SireProfile {
    const ROLE: Role = Role::Sire;

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn base_score(&self) -> u32 {
        self.base_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamProfile {
    pub name: String,
    pub tier: Tier,
    pub base_score: u32,
    pub foals: u32,
    pub winners: u32,
    #[serde(default)]
    pub stakes_winners: u32,
    #[serde(default)]
    pub notable_offspring: Vec<String>,
}

impl DamProfile {
    /// Share of foals that became winners, 0.0 when she has no foals.
    pub fn winner_rate(&self) -> f64 {
        if self.foals == 0 {
            return 0.0;
        }
        self.winners as f64 / self.foals as f64
    }

    pub fn stakes_winner_rate(&self) -> f64 {
        if self.foals == 0 {
            return 0.0;
        }
        self.stakes_winners as f64 / self.foals as f64
    }
}

impl PedigreeProfile for DamProfile {
    const ROLE: Role = Role::Dam;

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn base_score(&self) -> u32 {
        self.base_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamsireProfile {
    pub name: String,
    pub tier: Tier,
    pub base_score: u32,
    /// Surface his daughters tend to pass on.
    pub surface: Surface,
    pub stamina: StaminaInfluence,
    pub distance: DistanceCategory,
}

impl PedigreeProfile for DamsireProfile {
    const ROLE: Role = Role::Damsire;

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> Tier {
        self.tier
    }

    fn base_score(&self) -> u32 {
        self.base_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Elite > Tier::Strong);
        assert!(Tier::Strong > Tier::Average);
        assert!(Tier::Average > Tier::BelowAverage);
    }

    #[test]
    fn test_tier_bands_stay_under_ceiling() {
        for role in Role::ALL {
            for tier in Tier::ALL {
                let band = role.tier_band(tier);
                assert!(*band.end() <= role.ceiling(), "{role} {tier:?}");
            }
        }
    }

    #[test]
    fn test_tier_bands_are_contiguous() {
        for role in Role::ALL {
            // Tier::ALL is ordered high to low
            for pair in Tier::ALL.windows(2) {
                let upper = role.tier_band(pair[0]);
                let lower = role.tier_band(pair[1]);
                assert_eq!(*lower.end() + 1, *upper.start(), "{role}");
            }
            assert_eq!(*role.tier_band(Tier::BelowAverage).start(), 0);
            assert_eq!(*role.tier_band(Tier::Elite).end(), role.ceiling());
        }
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Sire".parse::<Role>().unwrap(), Role::Sire);
        assert_eq!("dam".parse::<Role>().unwrap(), Role::Dam);
        assert_eq!("broodmare_sire".parse::<Role>().unwrap(), Role::Damsire);
        assert!("grandsire".parse::<Role>().is_err());
    }

    #[test]
    fn test_dam_tier_label() {
        assert_eq!(Role::Dam.tier_label(Tier::Strong), "Good");
        assert_eq!(Role::Sire.tier_label(Tier::Strong), "Strong");
    }

    #[test]
    fn test_good_alias_deserializes_to_strong() {
        let tier: Tier = serde_json::from_str("\"good\"").unwrap();
        assert_eq!(tier, Tier::Strong);
    }

    #[test]
    fn test_surface_mismatch() {
        assert!(Surface::Dirt.is_direct_mismatch(Surface::Turf));
        assert!(Surface::Turf.is_direct_mismatch(Surface::Dirt));
        assert!(!Surface::Dirt.is_direct_mismatch(Surface::Synthetic));
        assert!(!Surface::Versatile.is_direct_mismatch(Surface::Dirt));
    }

    #[test]
    fn test_dam_winner_rate() {
        let dam = DamProfile {
            name: "Test".to_string(),
            tier: Tier::Average,
            base_score: 9,
            foals: 8,
            winners: 6,
            stakes_winners: 2,
            notable_offspring: Vec::new(),
        };
        assert_eq!(dam.winner_rate(), 0.75);
        assert_eq!(dam.stakes_winner_rate(), 0.25);
    }
}
