//! # Configuration
//!
//! Settings from `levelup.toml`, overridable from the command line.
//!
//! ```toml
//! database = "levelup.db"
//! backend = "redb"        # or "memory"
//! key_prefix = "levelup"
//! log_format = "text"     # or "json"
//! ```
//!
//! Every field is optional. The default file is read only if it exists; a
//! file named explicitly with `--config` must exist.

use clap::ValueEnum;
use levelup_core::{DEFAULT_KEY_PREFIX, LevelUpError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "levelup.toml";

/// Default redb database path.
pub const DEFAULT_DATABASE: &str = "levelup.db";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "LEVELUP_LOG_FORMAT";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// redb database file.
    #[default]
    Redb,
    /// Volatile in-memory map (dry runs).
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse the value of `LEVELUP_LOG_FORMAT`; unknown values are ignored.
    #[must_use]
    pub fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the redb database.
    pub database: PathBuf,
    /// Which store to use.
    pub backend: BackendKind,
    /// Namespace prefix for storage keys.
    pub key_prefix: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            backend: BackendKind::default(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, LevelUpError> {
        toml::from_str(text).map_err(|e| LevelUpError::Config(e.to_string()))
    }

    /// Read settings from a file that must exist.
    pub fn from_file(path: &Path) -> Result<Self, LevelUpError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LevelUpError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load settings from `explicit`, or from `levelup.toml` if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, LevelUpError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
