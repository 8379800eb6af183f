//! Pedigree scoring for horses with little or no race history.
//!
//! The [`breeding`] module holds the scoring engine; [`routes`] exposes it
//! over HTTP.

pub mod breeding;
pub mod config;
pub mod error;
pub mod routes;
pub mod types;

pub use breeding::{calculate_breeding_score, BreedingEngine, BreedingScore};
pub use error::BreedingError;
