//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - trains the three scoring models
//! - starts the HTTP API

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::domain::TrainConfig;
use crate::error::ScoreError;
use crate::service::ScoringService;

/// Entry point for the `estate-score` binary.
pub async fn run() -> Result<(), ScoreError> {
    // A missing .env file is fine; values also come from the process
    // environment.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging();

    let config = TrainConfig {
        seed: cli.seed,
        ..TrainConfig::default()
    };
    tracing::info!(
        "training scoring models ({} samples per task, seed {})",
        config.sample_count,
        config.seed
    );
    let service = tokio::task::spawn_blocking(move || ScoringService::train(config))
        .await
        .map_err(|e| ScoreError::computation(format!("training task failed: {e}")))??;

    let addr = SocketAddr::new(cli.bind, cli.port);
    crate::server::serve(Arc::new(service), addr)
        .await
        .map_err(|e| ScoreError::computation(format!("HTTP server error: {e}")))
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
