//! Breeding info extraction: raw horse snapshot to canonical record.

use serde::{Deserialize, Serialize};

use crate::breeding::normalize::{canonical_name, is_unknown};
use crate::error::BreedingError;

/// Horses with this many starts or more are past the point where pedigree
/// says anything their form does not.
pub const LIGHTLY_RACED_LIMIT: u32 = 8;

/// Horse as supplied by the surrounding handicapping pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HorseSnapshot {
    #[serde(default)]
    pub horse_id: Option<String>,
    #[serde(default)]
    pub horse_name: Option<String>,
    #[serde(default, alias = "sire_name")]
    pub sire: Option<String>,
    #[serde(default, alias = "dam_name")]
    pub dam: Option<String>,
    #[serde(default, alias = "damsire_name", alias = "broodmare_sire")]
    pub damsire: Option<String>,
    /// Signed so a corrupt negative count can be rejected instead of wrapping.
    #[serde(default, alias = "starts")]
    pub lifetime_starts: Option<i64>,
}

impl HorseSnapshot {
    pub fn new(sire: &str, dam: &str, damsire: &str, lifetime_starts: i64) -> Self {
        Self {
            sire: Some(sire.to_string()),
            dam: Some(dam.to_string()),
            damsire: Some(damsire.to_string()),
            lifetime_starts: Some(lifetime_starts),
            ..Default::default()
        }
    }
}

/// Canonical breeding view of one horse, rebuilt on every scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreedingRecord {
    pub sire_name: String,
    pub dam_name: String,
    pub damsire_name: String,
    pub lifetime_starts: u32,
    pub is_debut: bool,
    pub is_lightly_raced: bool,
    pub is_complete: bool,
}

impl BreedingRecord {
    pub fn new(sire: Option<&str>, dam: Option<&str>, damsire: Option<&str>, lifetime_starts: u32) -> Self {
        let sire_name = canonical_name(sire);
        let dam_name = canonical_name(dam);
        let damsire_name = canonical_name(damsire);
        let is_complete =
            !is_unknown(&sire_name) && !is_unknown(&dam_name) && !is_unknown(&damsire_name);

        Self {
            sire_name,
            dam_name,
            damsire_name,
            lifetime_starts,
            is_debut: lifetime_starts == 0,
            is_lightly_raced: lifetime_starts < LIGHTLY_RACED_LIMIT,
            is_complete,
        }
    }
}

/// Validate a caller-supplied start count. Absent means debut.
pub fn validate_starts(raw: Option<i64>) -> Result<u32, BreedingError> {
    match raw {
        None => Ok(0),
        Some(n) if n < 0 => Err(BreedingError::NegativeStarts(n)),
        Some(n) => Ok(u32::try_from(n).unwrap_or(u32::MAX)),
    }
}

/// Build the breeding record for a horse.
///
/// Missing or placeholder names never fail; they become `Unknown` and leave
/// the record incomplete. Only a negative start count is rejected.
pub fn extract_breeding_info(horse: &HorseSnapshot) -> Result<BreedingRecord, BreedingError> {
    let starts = validate_starts(horse.lifetime_starts)?;
    Ok(BreedingRecord::new(
        horse.sire.as_deref(),
        horse.dam.as_deref(),
        horse.damsire.as_deref(),
        starts,
    ))
}
