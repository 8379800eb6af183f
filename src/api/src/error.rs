//! Error types for the breeding engine.
//!
//! Missing or unrecognized pedigree data is never an error; these variants
//! cover caller-contract violations and broken reference data only.

use thiserror::Error;

use crate::breeding::profiles::Role;

/// Errors raised at the engine boundary or while loading reference data.
#[derive(Debug, Error)]
pub enum BreedingError {
    /// A negative start count means the upstream record is corrupt.
    #[error("lifetime starts must be non-negative, got {0}")]
    NegativeStarts(i64),

    #[error("{role} '{name}' has base score {score} outside the {tier} band {min}..={max}")]
    ScoreOutsideBand {
        role: Role,
        name: String,
        tier: &'static str,
        score: u32,
        min: u32,
        max: u32,
    },

    #[error("duplicate {role} entry for normalized name '{name}'")]
    DuplicateEntry { role: Role, name: String },

    #[error("{role} entry has an empty name")]
    EmptyName { role: Role },

    #[error("invalid {role} reference data: {source}")]
    InvalidData {
        role: Role,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {role} reference file {path}: {source}")]
    Io {
        role: Role,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown pedigree role '{0}' (expected sire, dam or damsire)")]
    UnknownRole(String),
}
