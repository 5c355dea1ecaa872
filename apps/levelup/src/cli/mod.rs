//! # LevelUp CLI Module
//!
//! This module implements the CLI interface for LevelUp.
//!
//! ## Available Commands
//!
//! - `mission complete|revoke|status|set-times` - Mission completion counters
//! - `world complete|revoke|status|reward` - World completion and rewards
//! - `score inspect` - Validate and normalise a score record

mod commands;

use crate::config::{BackendKind, Config};
use clap::{Parser, Subcommand};
use levelup_core::LevelUpError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// LevelUp - game progression store
///
/// Records mission completions, world completion and rewards, and checks
/// score definitions.
#[derive(Parser, Debug)]
#[command(name = "levelup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a levelup.toml config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the progress database (overrides config)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(short = 'B', long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// Storage key prefix (overrides config)
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of file settings.
    #[must_use]
    pub fn resolve(&self, mut config: Config) -> Config {
        if let Some(database) = &self.database {
            config.database.clone_from(database);
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(prefix) = &self.prefix {
            config.key_prefix.clone_from(prefix);
        }
        config
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mission completion counters
    Mission {
        #[command(subcommand)]
        action: MissionAction,
    },

    /// World completion and rewards
    World {
        #[command(subcommand)]
        action: WorldAction,
    },

    /// Score definitions
    Score {
        #[command(subcommand)]
        action: ScoreAction,
    },
}

/// Mission subcommands.
#[derive(Subcommand, Debug)]
pub enum MissionAction {
    /// Record one completion
    Complete {
        /// Mission id
        id: String,

        /// Do not post a notification
        #[arg(short, long)]
        silent: bool,
    },

    /// Revoke one completion (never below zero)
    Revoke {
        /// Mission id
        id: String,

        /// Do not post a notification
        #[arg(short, long)]
        silent: bool,
    },

    /// Show the completion counter
    Status {
        /// Mission id
        id: String,
    },

    /// Overwrite the completion counter
    SetTimes {
        /// Mission id
        id: String,

        /// New counter value
        times: u32,
    },
}

/// World subcommands.
#[derive(Subcommand, Debug)]
pub enum WorldAction {
    /// Mark the world completed
    Complete {
        /// World id
        id: String,

        /// Do not post a notification
        #[arg(short, long)]
        silent: bool,
    },

    /// Clear the world's completion
    Revoke {
        /// World id
        id: String,
    },

    /// Show completion and reward
    Status {
        /// World id
        id: String,
    },

    /// Assign a reward, or clear it when omitted
    Reward {
        /// World id
        id: String,

        /// Reward id
        reward: Option<String>,
    },
}

/// Score subcommands.
#[derive(Subcommand, Debug)]
pub enum ScoreAction {
    /// Parse a JSON score record and print its normalised form
    Inspect {
        /// Path to the JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved settings.
pub fn execute(cli: &Cli, config: &Config) -> Result<(), LevelUpError> {
    let report = run(&cli.command, config)?;

    if cli.json_mode {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| LevelUpError::Serialization(e.to_string()))?;
        println!("{}", text);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}
