//! Game configuration: TOML file first, command-line flags on top.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use noughts_engine::{MoveRng, TurnOrder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct GameConfig {
    /// How long the computer "thinks" before moving, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Whether the human opens the first game.
    #[serde(default = "default_human_first")]
    human_first: bool,

    /// Seed for the computer's random fallback; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where logs go while the board owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_think_delay_ms() -> u64 {
    500
}

fn default_human_first() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("noughts.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            default_think_delay_ms(),
            default_human_first(),
            None,
            default_log_file(),
        )
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(?config, "Config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolves the effective configuration for a command line.
    #[instrument(skip(cli))]
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Self::load_or_default(&cli.config)?.with_overrides(cli))
    }

    /// Applies command-line flags over file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(delay) = cli.think_delay_ms {
            self.think_delay_ms = delay;
        }
        if cli.computer_first {
            self.human_first = false;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        self
    }

    /// Thinking delay as a duration.
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Opener of the first game.
    pub fn turn_order(&self) -> TurnOrder {
        if self.human_first {
            TurnOrder::HumanFirst
        } else {
            TurnOrder::ComputerFirst
        }
    }

    /// Random source for the session.
    pub fn rng(&self) -> MoveRng {
        match self.seed {
            Some(seed) => MoveRng::seeded(seed),
            None => MoveRng::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
