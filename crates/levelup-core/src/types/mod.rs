//! # Core Type Definitions
//!
//! This module contains the identifiers and the error type shared by every
//! tracker:
//! - Entity identifiers (`MissionId`, `WorldId`)
//! - Error types (`LevelUpError`)
//!
//! Identifiers are opaque strings supplied by the game. They are embedded
//! verbatim into storage keys by `KeySchema`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// ENTITY IDENTIFIERS
// =============================================================================

/// Identifier of a mission.
/// Missions are goals that can be completed any number of times.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MissionId(pub String);

impl MissionId {
    /// Create a new mission id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MissionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a world (a game section with a completion flag).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldId(pub String);

impl WorldId {
    /// Create a new world id from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in LevelUp.
///
/// - Construction-time validation fails fast (`InvalidRange`, `Parse`)
/// - Corrupt persisted values are surfaced, never defaulted (`CorruptValue`)
/// - Backend and file failures are stringified (`Storage`, `Io`)
#[derive(Debug, Error)]
pub enum LevelUpError {
    /// A range was constructed with `low >= high` (or a NaN bound).
    #[error("Invalid range: low ({low}) isn't lower than high ({high})")]
    InvalidRange { low: f64, high: f64 },

    /// A stored value could not be decoded.
    #[error("Corrupt value under '{key}': {value:?}")]
    CorruptValue { key: String, value: String },

    /// A structured record is missing required fields or has wrong types.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value could not be represented in the output format.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The key-value backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// An input file could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
