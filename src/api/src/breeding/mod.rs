//! Breeding-based scoring for horses with little or no race history.
//!
//! Pedigree signal (sire, dam, damsire) stands in for missing form and fades
//! out as real starts accumulate.

pub mod aggregator;
pub mod bonus;
pub mod context;
pub mod engine;
pub mod extractor;
pub mod normalize;
pub mod profiles;
pub mod stores;
pub mod tier_scorer;
pub mod weighting;

pub use aggregator::{BreedingScore, Confidence, ScoreBreakdown, GLOBAL_CAP};
pub use bonus::{calculate_bonuses, BonusResult};
pub use context::{RaceConditions, RaceSnapshot, ScoreContext};
pub use engine::{
    calculate_breeding_score, calculate_detailed_breeding_score, score_field, score_field_detailed,
    BreedingEngine, DetailedBreedingScore, FieldRunnerScore, FieldScore,
};
pub use extractor::{extract_breeding_info, BreedingRecord, HorseSnapshot, LIGHTLY_RACED_LIMIT};
pub use profiles::{DistanceCategory, Role, Surface, Tier};
pub use stores::{load_stores, stores, PedigreeStores};
pub use weighting::{blend_into_handicap, experience_weight, weighted_contribution};
