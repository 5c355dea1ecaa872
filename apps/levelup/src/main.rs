//! # LevelUp - Game Progression Store
//!
//! The command-line binary for levelup-core.
//!
//! ## Usage
//!
//! ```bash
//! # Missions
//! levelup mission complete boss1
//! levelup mission revoke boss1 --silent
//! levelup mission status boss1
//!
//! # Worlds
//! levelup world complete world1
//! levelup world reward world1 gold_medal
//!
//! # Scores
//! levelup score inspect -f shots.json
//!
//! # Machine-readable output, custom database
//! levelup --json-mode -D save.db world status world1
//! ```

use clap::Parser;
use levelup::cli;
use levelup::config::{Config, LOG_FORMAT_ENV, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Load settings before logging so the config file can pick the format.
    let loaded = Config::load(cli.config.as_deref());
    let file_format = loaded
        .as_ref()
        .map(|config| config.log_format)
        .unwrap_or_default();
    init_tracing(resolve_log_format(file_format));

    let config = match loaded {
        Ok(config) => cli.resolve(config),
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration resolved");

    if let Err(e) = cli::execute(&cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `LEVELUP_LOG_FORMAT` wins over the config file.
fn resolve_log_format(file_format: LogFormat) -> LogFormat {
    std::env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|value| LogFormat::from_env_value(&value))
        .unwrap_or(file_format)
}

/// Initialize tracing to stderr; stdout carries command output.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "levelup=info,levelup_core=info".into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
