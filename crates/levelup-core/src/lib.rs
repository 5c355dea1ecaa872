//! # levelup-core
//!
//! Progression state for games - THE LOGIC.
//!
//! This crate persists what a player has achieved:
//! - how many times each mission was completed (`mission`)
//! - whether each world is completed and which reward it holds (`world`)
//! - score definitions constrained to a numeric range (`scoring`)
//!
//! ## Architecture
//!
//! The trackers are stateless. Everything they know lives in a
//! `KeyValueStore` under hierarchical keys built by `KeySchema`, and every
//! change they make is announced through an injected `EventSink`. There is
//! no global bus and no global store.
//!
//! ```
//! use levelup_core::{LevelUp, MissionId};
//!
//! let mut progress = LevelUp::in_memory(());
//! let boss = MissionId::new("boss1");
//!
//! progress.missions().set_completed(&boss, true)?;
//! assert!(progress.missions().is_completed(&boss)?);
//! # Ok::<(), levelup_core::LevelUpError>(())
//! ```
//!
//! ## Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - One read-modify-write per call; no multi-key transactions

// =============================================================================
// MODULES
// =============================================================================

pub mod events;
pub mod keys;
pub mod mission;
pub mod progress;
pub mod scoring;
pub mod storage;
pub mod types;
pub mod world;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{LevelUpError, MissionId, WorldId};

// =============================================================================
// RE-EXPORTS: Trackers and Storage
// =============================================================================

pub use events::{EventBus, EventSink, LevelUpEvent};
pub use keys::{DEFAULT_KEY_PREFIX, KeySchema};
pub use mission::MissionStorage;
pub use progress::LevelUp;
pub use storage::{KeyValueStore, MemoryStore, RedbStore, StorageBackend};
pub use world::WorldStorage;

// =============================================================================
// RE-EXPORTS: Scoring
// =============================================================================

pub use scoring::{Range, Score, ScoreKind};
