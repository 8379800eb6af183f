//! Breeding engine entry points.
//!
//! Extractor → tier scorers → bonus calculator → aggregator. Horses at or
//! past the lightly-raced limit short-circuit before any scorer runs.

use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

use crate::breeding::aggregator::{aggregate, BreedingScore};
use crate::breeding::bonus::calculate_bonuses;
use crate::breeding::context::{RaceConditions, RaceSnapshot, ScoreContext};
use crate::breeding::extractor::{
    extract_breeding_info, BreedingRecord, HorseSnapshot, LIGHTLY_RACED_LIMIT,
};
use crate::breeding::normalize::UNKNOWN;
use crate::breeding::profiles::{
    DamProfile, DamsireProfile, DistanceCategory, PedigreeProfile, SireProfile, Surface,
};
use crate::breeding::stores::{stores, PedigreeStores};
use crate::breeding::tier_scorer::{score_dam, score_damsire, score_sire, TierScore};
use crate::breeding::weighting::{experience_weight, weighted_contribution};
use crate::error::BreedingError;

const UNRECOGNIZED_COLOR: &str = "#BDBDBD";

/// Per-role view for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDetail<'a, P> {
    pub name: String,
    pub score: u32,
    pub recognized: bool,
    pub tier_label: &'static str,
    pub badge_color: &'static str,
    pub reasoning: String,
    pub profile: Option<&'a P>,
}

impl<'a, P: PedigreeProfile> RoleDetail<'a, P> {
    fn from_tier_score(name: &str, scored: TierScore<'a, P>) -> Self {
        let (tier_label, badge_color) = match scored.profile {
            Some(p) => (P::ROLE.tier_label(p.tier()), p.tier().badge_color()),
            None => (UNKNOWN, UNRECOGNIZED_COLOR),
        };
        Self {
            name: name.to_string(),
            score: scored.score,
            recognized: scored.profile.is_some(),
            tier_label,
            badge_color,
            reasoning: scored.reasoning,
            profile: scored.profile,
        }
    }

    fn not_evaluated(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 0,
            recognized: false,
            tier_label: UNKNOWN,
            badge_color: UNRECOGNIZED_COLOR,
            reasoning: format!("{} not evaluated", P::ROLE),
            profile: None,
        }
    }
}

/// The breeding score plus everything a badge or explanation panel needs.
/// Bonus reasons live in `score.breakdown.bonuses.reasons`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedBreedingScore<'a> {
    #[serde(flatten)]
    pub score: BreedingScore,
    pub record: BreedingRecord,
    pub context: ScoreContext,
    pub sire: RoleDetail<'a, SireProfile>,
    pub dam: RoleDetail<'a, DamProfile>,
    pub damsire: RoleDetail<'a, DamsireProfile>,
}

impl AsRef<BreedingScore> for DetailedBreedingScore<'_> {
    fn as_ref(&self) -> &BreedingScore {
        &self.score
    }
}

/// One runner's entry in a scored race field. `S` is the per-runner result:
/// a [`BreedingScore`], or a [`DetailedBreedingScore`] for detailed fields.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRunnerScore<S = BreedingScore> {
    /// Position in the submitted field.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horse_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horse_name: Option<String>,
    pub lifetime_starts: Option<u32>,
    pub weight: f64,
    pub contribution: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<S>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Every runner in a race scored under the same conditions.
#[derive(Debug, Clone, Serialize)]
pub struct FieldScore<S = BreedingScore> {
    pub surface: Surface,
    pub distance_category: DistanceCategory,
    pub furlongs: Option<f64>,
    /// Highest contribution first; ties keep submission order, rejected
    /// runners last.
    pub runners: Vec<FieldRunnerScore<S>>,
}

/// Scoring engine bound to a set of reference stores.
#[derive(Debug, Clone, Copy)]
pub struct BreedingEngine<'a> {
    stores: &'a PedigreeStores,
}

impl BreedingEngine<'static> {
    /// Engine over the process-wide stores.
    pub fn global() -> Self {
        Self { stores: stores() }
    }
}

impl<'a> BreedingEngine<'a> {
    pub fn new(stores: &'a PedigreeStores) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &'a PedigreeStores {
        self.stores
    }

    /// Score one horse in one race.
    pub fn score(&self, horse: &HorseSnapshot, race: &RaceSnapshot) -> Result<BreedingScore, BreedingError> {
        let record = extract_breeding_info(horse)?;
        Ok(self.evaluate(record, &RaceConditions::from_race(race)).score)
    }

    /// Score one horse and keep the per-role detail.
    pub fn score_detailed(
        &self,
        horse: &HorseSnapshot,
        race: &RaceSnapshot,
    ) -> Result<DetailedBreedingScore<'a>, BreedingError> {
        let record = extract_breeding_info(horse)?;
        Ok(self.evaluate(record, &RaceConditions::from_race(race)))
    }

    /// Score every runner in a race. A runner with an invalid record is
    /// reported in place and does not stop the others.
    pub fn score_field(&self, race: &RaceSnapshot, horses: &[HorseSnapshot]) -> FieldScore {
        self.field_with(race, horses, |detailed| detailed.score)
    }

    /// [`score_field`](Self::score_field) keeping per-role detail for each
    /// runner.
    pub fn score_field_detailed(
        &self,
        race: &RaceSnapshot,
        horses: &[HorseSnapshot],
    ) -> FieldScore<DetailedBreedingScore<'a>> {
        self.field_with(race, horses, |detailed| detailed)
    }

    fn field_with<S>(
        &self,
        race: &RaceSnapshot,
        horses: &[HorseSnapshot],
        project: impl Fn(DetailedBreedingScore<'a>) -> S,
    ) -> FieldScore<S> {
        let conditions = RaceConditions::from_race(race);

        let mut runners: Vec<FieldRunnerScore<S>> = horses
            .iter()
            .enumerate()
            .map(|(index, horse)| {
                let base = FieldRunnerScore {
                    index,
                    horse_id: horse.horse_id.clone(),
                    horse_name: horse.horse_name.clone(),
                    lifetime_starts: None,
                    weight: 0.0,
                    contribution: 0,
                    score: None,
                    error: None,
                };
                match extract_breeding_info(horse) {
                    Ok(record) => {
                        let starts = record.lifetime_starts;
                        let detailed = self.evaluate(record, &conditions);
                        FieldRunnerScore {
                            lifetime_starts: Some(starts),
                            weight: experience_weight(starts),
                            contribution: weighted_contribution(detailed.score.total, starts),
                            score: Some(project(detailed)),
                            ..base
                        }
                    }
                    Err(e) => FieldRunnerScore {
                        error: Some(e.to_string()),
                        ..base
                    },
                }
            })
            .collect();

        runners.sort_by_key(|r| (r.error.is_some(), Reverse(r.contribution)));

        debug!(
            "Scored field of {} runners ({} {})",
            runners.len(),
            conditions.surface.as_str(),
            conditions.distance_category.as_str()
        );

        FieldScore {
            surface: conditions.surface,
            distance_category: conditions.distance_category,
            furlongs: conditions.furlongs,
            runners,
        }
    }

    fn evaluate(&self, record: BreedingRecord, conditions: &RaceConditions) -> DetailedBreedingScore<'a> {
        let context = conditions.for_runner(record.is_debut);

        if record.lifetime_starts >= LIGHTLY_RACED_LIMIT {
            debug!(
                "Skipping breeding analysis: {} starts (limit {})",
                record.lifetime_starts, LIGHTLY_RACED_LIMIT
            );
            return DetailedBreedingScore {
                score: BreedingScore::not_applicable(record.lifetime_starts),
                sire: RoleDetail::not_evaluated(&record.sire_name),
                dam: RoleDetail::not_evaluated(&record.dam_name),
                damsire: RoleDetail::not_evaluated(&record.damsire_name),
                context,
                record,
            };
        }

        let sire = score_sire(&self.stores.sires, &record.sire_name, &context);
        let dam = score_dam(&self.stores.dams, &record.dam_name);
        let damsire = score_damsire(&self.stores.damsires, &record.damsire_name, &context);

        let bonuses = calculate_bonuses(sire.profile, damsire.profile, &context);
        let score = aggregate(&sire, &dam, &damsire, bonuses, &context);

        DetailedBreedingScore {
            score,
            sire: RoleDetail::from_tier_score(&record.sire_name, sire),
            dam: RoleDetail::from_tier_score(&record.dam_name, dam),
            damsire: RoleDetail::from_tier_score(&record.damsire_name, damsire),
            context,
            record,
        }
    }
}

/// Score one horse against the global stores.
pub fn calculate_breeding_score(
    horse: &HorseSnapshot,
    race: &RaceSnapshot,
) -> Result<BreedingScore, BreedingError> {
    BreedingEngine::global().score(horse, race)
}

/// Detailed score for one horse against the global stores.
pub fn calculate_detailed_breeding_score(
    horse: &HorseSnapshot,
    race: &RaceSnapshot,
) -> Result<DetailedBreedingScore<'static>, BreedingError> {
    BreedingEngine::global().score_detailed(horse, race)
}

/// Score a race field against the global stores.
pub fn score_field(race: &RaceSnapshot, horses: &[HorseSnapshot]) -> FieldScore {
    BreedingEngine::global().score_field(race, horses)
}

/// Detailed race-field scoring against the global stores.
pub fn score_field_detailed(
    race: &RaceSnapshot,
    horses: &[HorseSnapshot],
) -> FieldScore<DetailedBreedingScore<'static>> {
    BreedingEngine::global().score_field_detailed(race, horses)
}
