//! # LevelUp Application Library
//!
//! CLI structure, command implementations and configuration loading,
//! exposed as a library so integration tests can drive them directly.

pub mod cli;
pub mod config;
