//! Noughts - tic-tac-toe in the terminal
//!
//! The human plays X, the computer plays O and answers each move after a
//! short thinking delay.

#![warn(missing_docs)]

mod cli;
mod config;
mod controller;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::GameConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::from_cli(&cli)?;

    init_tracing(config.log_file())?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting noughts");

    tui::run(config).await
}

/// Sends logs to a file so they stay off the board.
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,noughts=debug,noughts_engine=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
