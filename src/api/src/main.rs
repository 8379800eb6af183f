//! Breeding API
//!
//! REST API and CLI for pedigree scoring of lightly raced horses.

mod cli;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breeding_api::breeding::load_stores;
use breeding_api::config::AppConfig;
use breeding_api::routes::{self, AppState};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breeding_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(host, port).await,
        Commands::Score {
            input,
            format,
            detailed,
        } => cli::run_score(input, format, detailed),
        Commands::Lookup { role, name } => cli::run_lookup(role, name),
        Commands::Stores => cli::run_stores(),
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Load configuration, CLI args take precedence
    let config = AppConfig::load()?.with_server_overrides(host, port);

    tracing::info!("Configuration loaded");

    let stores = load_stores(&config.pedigree)?;
    tracing::info!(
        sires = stores.sires.len(),
        dams = stores.dams.len(),
        damsires = stores.damsires.len(),
        "Reference data loaded"
    );

    let state = Arc::new(AppState { stores });
    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
