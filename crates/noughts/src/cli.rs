//! Command-line interface for noughts.

use clap::Parser;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a heuristic computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against the computer in your terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (missing file means defaults)
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Seed for the computer's random moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Computer thinking delay in milliseconds
    #[arg(long)]
    pub think_delay_ms: Option<u64>,

    /// Let the computer open the first game
    #[arg(long)]
    pub computer_first: bool,

    /// Log file (the terminal is taken by the board)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
