//! Request and response types for the breeding API.

use serde::{Deserialize, Serialize};

use crate::breeding::{HorseSnapshot, RaceSnapshot};

/// Score one horse in one race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub horse: HorseSnapshot,
    pub race: RaceSnapshot,
}

/// Score every runner in a race. Also the CLI input file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRequest {
    #[serde(default)]
    pub race_id: Option<String>,
    pub race: RaceSnapshot,
    pub horses: Vec<HorseSnapshot>,
}

/// Query options for the score endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreQuery {
    #[serde(default)]
    pub detailed: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
