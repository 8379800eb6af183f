//! CLI commands for breeding-api.
//!
//! Supports API server mode, field scoring from a JSON file, and reference
//! store inspection.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use breeding_api::breeding::{
    load_stores, BreedingEngine, BreedingScore, DetailedBreedingScore, FieldRunnerScore,
    FieldScore, Role,
};
use breeding_api::config::AppConfig;
use breeding_api::types::FieldRequest;

#[derive(Parser)]
#[command(name = "breeding-api")]
#[command(version, about = "Pedigree scoring for lightly raced horses: API and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Score every runner in a race JSON file
    Score {
        /// Path to race field JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Include per-role detail for each runner
        #[arg(short, long)]
        detailed: bool,
    },

    /// Look up a sire, dam or damsire in the reference data
    Lookup {
        /// Role: sire, dam or damsire
        role: String,

        /// Name as it appears on the race card
        name: String,
    },

    /// Summarize the loaded reference data
    Stores,
}

/// Read a race field request from a JSON file.
fn load_request(input: &Path) -> anyhow::Result<FieldRequest> {
    let input_json = std::fs::read_to_string(input)?;
    Ok(serde_json::from_str(&input_json)?)
}

/// Run field scoring from file.
pub fn run_score(input: PathBuf, format: String, detailed: bool) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let stores = load_stores(&config.pedigree)?;
    let engine = BreedingEngine::new(stores);

    let req = load_request(&input)?;

    if let Some(ref race_id) = req.race_id {
        eprintln!("Processing race: {}", race_id);
    }
    eprintln!("Horses: {}", req.horses.len());

    let race_id = req.race_id.as_deref();
    if detailed {
        let field = engine.score_field_detailed(&req.race, &req.horses);
        if print_field(race_id, &field, &format)? {
            print_pedigree_detail(&field);
        }
    } else {
        let field = engine.score_field(&req.race, &req.horses);
        print_field(race_id, &field, &format)?;
    }

    Ok(())
}

/// Print a scored field in the requested format. Returns true when the
/// table layout was used.
fn print_field<S>(race_id: Option<&str>, field: &FieldScore<S>, format: &str) -> anyhow::Result<bool>
where
    S: Serialize + AsRef<BreedingScore>,
{
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(field)?);
            Ok(false)
        }
        "table" => {
            print_field_table(race_id, field);
            Ok(true)
        }
        _ => {
            eprintln!("Unknown format: {}. Using JSON.", format);
            println!("{}", serde_json::to_string_pretty(field)?);
            Ok(false)
        }
    }
}

fn runner_label<S>(runner: &FieldRunnerScore<S>) -> String {
    runner
        .horse_name
        .clone()
        .or_else(|| runner.horse_id.clone())
        .unwrap_or_else(|| format!("#{}", runner.index + 1))
}

/// Print field scores in table format.
fn print_field_table<S: AsRef<BreedingScore>>(race_id: Option<&str>, field: &FieldScore<S>) {
    if let Some(id) = race_id {
        println!("Race: {}", id);
    }
    let distance = field
        .furlongs
        .map(|f| format!("{:.1}f", f))
        .unwrap_or_else(|| "?".to_string());
    println!(
        "Conditions: {} {} ({})",
        field.surface.as_str(),
        distance,
        field.distance_category.as_str()
    );
    println!();

    println!("=== Breeding Contributions ===");
    for (i, runner) in field.runners.iter().enumerate() {
        let label = runner_label(runner);
        let score: Option<&BreedingScore> = runner.score.as_ref().map(|s| s.as_ref());
        match (score, &runner.error) {
            (_, Some(err)) => println!("  {:2}. {:<24} error: {}", i + 1, label, err),
            (Some(score), None) if score.was_applied => println!(
                "  {:2}. {:<24} {:>3} x {:.1} = {:>2}  [{}] {}",
                i + 1,
                label,
                score.total,
                runner.weight,
                runner.contribution,
                score.confidence.as_str(),
                score.summary
            ),
            (Some(score), None) => println!(
                "  {:2}. {:<24} not applied: {}",
                i + 1,
                label,
                score.not_applied_reason.as_deref().unwrap_or("")
            ),
            (None, None) => println!("  {:2}. {:<24} -", i + 1, label),
        }
    }
    println!();
}

/// Print per-role reasoning and bonus reasons under the field table.
fn print_pedigree_detail(field: &FieldScore<DetailedBreedingScore<'_>>) {
    println!("=== Pedigree Detail ===");
    for runner in &field.runners {
        let Some(ref detail) = runner.score else {
            continue;
        };
        println!("  {}", runner_label(runner));
        for line in [
            &detail.sire.reasoning,
            &detail.dam.reasoning,
            &detail.damsire.reasoning,
        ] {
            println!("    {}", line);
        }
        for reason in &detail.score.breakdown.bonuses.reasons {
            println!("    {}", reason);
        }
    }
    println!();
}

/// Print a single reference profile.
pub fn run_lookup(role: String, name: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let stores = load_stores(&config.pedigree)?;
    let role: Role = role.parse()?;

    match stores.lookup(role, &name) {
        Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
        None => println!("No {} named '{}' in reference data", role, name),
    }
    Ok(())
}

/// Print reference store counts by tier.
pub fn run_stores() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let stores = load_stores(&config.pedigree)?;

    let rows = [
        ("Sires", stores.sires.description(), stores.sires.summary()),
        ("Dams", stores.dams.description(), stores.dams.summary()),
        ("Damsires", stores.damsires.description(), stores.damsires.summary()),
    ];
    for (title, description, summary) in rows {
        println!("=== {} (v{}, {} entries) ===", title, summary.version, summary.entries);
        if !description.is_empty() {
            println!("  {}", description);
        }
        for (tier, count) in &summary.tiers {
            println!("  {:>14}: {}", tier, count);
        }
        println!();
    }
    Ok(())
}
