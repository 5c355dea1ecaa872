//! # Storage Key Schema
//!
//! Hierarchical key naming for persisted progression state.
//!
//! Keys have the form `<prefix>.<entity type>.<entity id>.<attribute>`:
//! - `levelup.missions.boss1.timesCompleted`
//! - `levelup.worlds.w1.completed`
//! - `levelup.worlds.w1.assignedReward`
//!
//! Key building is a pure string concern; storage mechanics live in
//! `storage`.

use crate::{MissionId, WorldId};

/// Default namespace prefix for every key.
pub const DEFAULT_KEY_PREFIX: &str = "levelup";

/// Entity type segment for missions.
pub const MISSIONS: &str = "missions";

/// Entity type segment for worlds.
pub const WORLDS: &str = "worlds";

/// Mission attribute: completion counter.
pub const TIMES_COMPLETED: &str = "timesCompleted";

/// World attribute: completion flag (presence means completed).
pub const COMPLETED: &str = "completed";

/// World attribute: assigned reward id.
pub const ASSIGNED_REWARD: &str = "assignedReward";

/// Value written under a world's completion key.
pub const COMPLETED_SENTINEL: &str = "yes";

/// Builds storage keys under a namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    prefix: String,
}

impl KeySchema {
    /// Create a schema with a custom prefix.
    ///
    /// A trailing `.` on the prefix is ignored so `"game."` and `"game"`
    /// produce identical keys.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('.') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// The namespace prefix, without trailing separator.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, entity_type: &str, id: &str, attribute: &str) -> String {
        if self.prefix.is_empty() {
            format!("{}.{}.{}", entity_type, id, attribute)
        } else {
            format!("{}.{}.{}.{}", self.prefix, entity_type, id, attribute)
        }
    }

    /// Key of a mission's completion counter.
    #[must_use]
    pub fn mission_times_completed(&self, mission: &MissionId) -> String {
        self.key(MISSIONS, mission.as_str(), TIMES_COMPLETED)
    }

    /// Key of a world's completion flag.
    #[must_use]
    pub fn world_completed(&self, world: &WorldId) -> String {
        self.key(WORLDS, world.as_str(), COMPLETED)
    }

    /// Key of a world's assigned reward.
    #[must_use]
    pub fn world_assigned_reward(&self, world: &WorldId) -> String {
        self.key(WORLDS, world.as_str(), ASSIGNED_REWARD)
    }
}

impl Default for KeySchema {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}
