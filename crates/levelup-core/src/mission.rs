//! # Mission Storage
//!
//! Persists and queries how many times each mission has been completed.
//!
//! The counter lives under `<prefix>.missions.<id>.timesCompleted` as decimal
//! text. A mission is completed when its counter is above zero. Revoking a
//! completion decrements the counter, clamped at zero.
//!
//! The counter update is a read followed by a write. Exclusivity comes from
//! the `&mut` borrow of the store; callers sharing a store across threads
//! must lock around whole calls.

use crate::events::{EventSink, LevelUpEvent};
use crate::keys::KeySchema;
use crate::storage::KeyValueStore;
use crate::{LevelUpError, MissionId};

/// Mission completion tracker over a borrowed store and event sink.
pub struct MissionStorage<'a, S: KeyValueStore, E: EventSink> {
    store: &'a mut S,
    events: &'a E,
    keys: &'a KeySchema,
}

impl<'a, S: KeyValueStore, E: EventSink> MissionStorage<'a, S, E> {
    /// Create a tracker view.
    pub fn new(store: &'a mut S, events: &'a E, keys: &'a KeySchema) -> Self {
        Self {
            store,
            events,
            keys,
        }
    }

    /// Record a completion (or revoke one) and notify.
    pub fn set_completed(
        &mut self,
        mission: &MissionId,
        completed: bool,
    ) -> Result<(), LevelUpError> {
        self.set_completed_with_notify(mission, completed, true)
    }

    /// Record a completion (or revoke one).
    ///
    /// The counter moves by one in the requested direction and never drops
    /// below zero. When `notify` is set, exactly one event is posted after
    /// the write, even if the clamp left the counter unchanged.
    pub fn set_completed_with_notify(
        &mut self,
        mission: &MissionId,
        completed: bool,
        notify: bool,
    ) -> Result<(), LevelUpError> {
        let current = self.times_completed(mission)?;
        let total = if completed {
            current.saturating_add(1)
        } else {
            current.saturating_sub(1)
        };

        self.set_times_completed(mission, total)?;

        if notify {
            let mission_id = mission.clone();
            self.events.post(if completed {
                LevelUpEvent::MissionCompleted { mission_id }
            } else {
                LevelUpEvent::MissionCompletionRevoked { mission_id }
            });
        }
        Ok(())
    }

    /// Whether the mission has been completed at least once.
    pub fn is_completed(&self, mission: &MissionId) -> Result<bool, LevelUpError> {
        Ok(self.times_completed(mission)? > 0)
    }

    /// Number of recorded completions; 0 when absent or empty.
    ///
    /// A stored value that isn't a non-negative decimal integer is reported
    /// as `LevelUpError::CorruptValue` rather than read as zero.
    pub fn times_completed(&self, mission: &MissionId) -> Result<u32, LevelUpError> {
        let key = self.keys.mission_times_completed(mission);
        match self.store.get(&key)? {
            None => Ok(0),
            Some(value) if value.is_empty() => Ok(0),
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| LevelUpError::CorruptValue { key, value }),
        }
    }

    /// Overwrite the completion counter without notifying.
    pub fn set_times_completed(
        &mut self,
        mission: &MissionId,
        times_completed: u32,
    ) -> Result<(), LevelUpError> {
        let key = self.keys.mission_times_completed(mission);
        self.store.set(&key, &times_completed.to_string())?;
        tracing::debug!(mission = %mission, times_completed, "mission counter written");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
