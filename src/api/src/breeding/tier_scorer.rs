//! Tier scorers: one per pedigree role.
//!
//! Each scorer looks a name up in its role's store and returns the tiered
//! score for a known individual, or the fixed baseline for an unknown one.
//! All adjustments are summed before clamping to `[0, role ceiling]`.

use serde::Serialize;

use crate::breeding::context::ScoreContext;
use crate::breeding::normalize::is_unknown;
use crate::breeding::profiles::{
    DamProfile, DamsireProfile, DistanceCategory, PedigreeProfile, Role, SireProfile,
    StaminaInfluence,
};
use crate::breeding::stores::ReferenceStore;

/// Score for an individual missing from its reference store.
pub const UNKNOWN_BASELINE: u32 = 5;

/// First-time starter win percentage that earns the sire debut uplift.
pub const FIRST_STARTER_WIN_THRESHOLD: f64 = 13.0;

const SIRE_SURFACE_MATCH: i32 = 2;
const SIRE_SURFACE_MISMATCH: i32 = -2;
const SIRE_DISTANCE_MATCH: i32 = 1;
const SIRE_DEBUT_UPLIFT: i32 = 2;
const DAMSIRE_ROUTE_STAMINA: i32 = 1;

/// Output of a tier scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierScore<'a, P> {
    pub score: u32,
    pub profile: Option<&'a P>,
    pub reasoning: String,
}

impl<P> TierScore<'_, P> {
    pub fn is_recognized(&self) -> bool {
        self.profile.is_some()
    }
}

fn clamp_to_role(score: i32, role: Role) -> u32 {
    score.clamp(0, role.ceiling() as i32) as u32
}

fn baseline<'a, P>(role: Role, name: &str) -> TierScore<'a, P> {
    let reasoning = if is_unknown(name) {
        format!("{} not recorded; baseline {} pts", capitalize(role), UNKNOWN_BASELINE)
    } else {
        format!(
            "{} '{}' not recognized; baseline {} pts",
            capitalize(role),
            name,
            UNKNOWN_BASELINE
        )
    };
    TierScore {
        score: UNKNOWN_BASELINE,
        profile: None,
        reasoning,
    }
}

fn capitalize(role: Role) -> &'static str {
    match role {
        Role::Sire => "Sire",
        Role::Dam => "Dam",
        Role::Damsire => "Damsire",
    }
}

fn lookup<'a, P: PedigreeProfile>(store: &'a ReferenceStore<P>, name: &str) -> Option<&'a P> {
    if is_unknown(name) {
        return None;
    }
    store.get(name)
}

/// Render "Name (Elite sire): base 22, +2 dirt surface = 24".
fn render<P: PedigreeProfile>(profile: &P, adjustments: &[String], final_score: u32) -> String {
    let role = P::ROLE;
    let mut text = format!(
        "{} ({} {}): base {}",
        profile.name(),
        role.tier_label(profile.tier()),
        role,
        profile.base_score()
    );
    for adj in adjustments {
        text.push_str(", ");
        text.push_str(adj);
    }
    text.push_str(&format!(" = {}", final_score));
    text
}

/// Score a sire against the race context.
///
/// Adjustments: +2 when his concrete surface preference matches the race,
/// -2 on a direct dirt/turf mismatch, +1 when his non-versatile distance
/// category matches, +2 for a debut runner when his first-time starters win
/// at 13% or better.
pub fn score_sire<'a>(
    store: &'a ReferenceStore<SireProfile>,
    name: &str,
    context: &ScoreContext,
) -> TierScore<'a, SireProfile> {
    let Some(profile) = lookup(store, name) else {
        return baseline(Role::Sire, name);
    };

    let mut score = profile.base_score as i32;
    let mut adjustments = Vec::new();

    if profile.surface.is_concrete() && profile.surface == context.surface {
        score += SIRE_SURFACE_MATCH;
        adjustments.push(format!("+{} {} surface", SIRE_SURFACE_MATCH, profile.surface.as_str()));
    } else if profile.surface.is_direct_mismatch(context.surface) {
        score += SIRE_SURFACE_MISMATCH;
        adjustments.push(format!(
            "{} {} sire on {}",
            SIRE_SURFACE_MISMATCH,
            profile.surface.as_str(),
            context.surface.as_str()
        ));
    }

    if profile.distance.is_concrete() && profile.distance == context.distance_category {
        score += SIRE_DISTANCE_MATCH;
        adjustments.push(format!("+{} {} distance", SIRE_DISTANCE_MATCH, profile.distance.as_str()));
    }

    if context.is_debut && profile.first_starter_win_pct >= FIRST_STARTER_WIN_THRESHOLD {
        score += SIRE_DEBUT_UPLIFT;
        adjustments.push(format!(
            "+{} first-time starters win {:.1}%",
            SIRE_DEBUT_UPLIFT, profile.first_starter_win_pct
        ));
    }

    let final_score = clamp_to_role(score, Role::Sire);
    TierScore {
        score: final_score,
        profile: Some(profile),
        reasoning: render(profile, &adjustments, final_score),
    }
}

/// Score a dam. Her production record is descriptive only; the base score
/// already reflects it.
pub fn score_dam<'a>(store: &'a ReferenceStore<DamProfile>, name: &str) -> TierScore<'a, DamProfile> {
    let Some(profile) = lookup(store, name) else {
        return baseline(Role::Dam, name);
    };

    let mut adjustments = Vec::new();
    if profile.foals > 0 {
        adjustments.push(format!(
            "{}/{} winners from foals",
            profile.winners, profile.foals
        ));
    }

    let final_score = clamp_to_role(profile.base_score as i32, Role::Dam);
    TierScore {
        score: final_score,
        profile: Some(profile),
        reasoning: render(profile, &adjustments, final_score),
    }
}

/// Score a damsire. A high-stamina damsire earns +1 in a route.
pub fn score_damsire<'a>(
    store: &'a ReferenceStore<DamsireProfile>,
    name: &str,
    context: &ScoreContext,
) -> TierScore<'a, DamsireProfile> {
    let Some(profile) = lookup(store, name) else {
        return baseline(Role::Damsire, name);
    };

    let mut score = profile.base_score as i32;
    let mut adjustments = Vec::new();

    if context.distance_category == DistanceCategory::Route
        && profile.stamina == StaminaInfluence::High
    {
        score += DAMSIRE_ROUTE_STAMINA;
        adjustments.push(format!("+{} stamina for a route", DAMSIRE_ROUTE_STAMINA));
    }

    let final_score = clamp_to_role(score, Role::Damsire);
    TierScore {
        score: final_score,
        profile: Some(profile),
        reasoning: render(profile, &adjustments, final_score),
    }
}
