//! CLI entry for the ragway binary
//!
//! Parses flags, loads configuration, builds the collaborator clients once,
//! and serves until shutdown. Construction order matters only here: clients
//! exist before the first request, so no request-time code touches global
//! state.

use anyhow::{Context, Result};
use clap::Parser;
use ragway_config::{CliArgs, Config};
use ragway_orchestrator::ChatOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::server::{self, AppState};

/// Command-line arguments for the gateway server
#[derive(Parser, Debug)]
#[command(
    name = "ragway",
    version,
    about = "Request-orchestration gateway for retrieval-augmented chat pipelines"
)]
pub struct Args {
    /// Path to a ragway.toml config file (skips discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bind address override, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub bind: Option<String>,

    /// Verbose (debug-level) logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Run the gateway server until shutdown.
///
/// # Errors
///
/// Returns an error if configuration loading, logging setup, client
/// construction, or binding the listener fails, or if the server exits
/// abnormally.
pub async fn run() -> Result<()> {
    let args = Args::parse();

    let cli_args = CliArgs {
        config_path: args.config,
        bind: args.bind,
        verbose: args.verbose,
    };
    let config = Config::discover(&cli_args).context("Failed to load configuration")?;

    ragway_utils::logging::init_tracing(config.verbose())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let (retrieval, generation) =
        ragway_client::from_config(&config).context("Failed to construct collaborator clients")?;
    let orchestrator = Arc::new(ChatOrchestrator::new(retrieval, generation));

    let app = server::create_router(AppState { orchestrator });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        retrieval = config.retrieval_base_url(),
        generation = config.generation_base_url(),
        "ragway listening"
    );

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
