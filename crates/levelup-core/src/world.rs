//! # World Storage
//!
//! Persists each world's completion flag and assigned reward.
//!
//! Completion is encoded by key presence: the completion key holds a
//! sentinel while the world is completed and is deleted otherwise. The
//! reward key holds the reward id, or is absent.

use crate::events::{EventSink, LevelUpEvent};
use crate::keys::{COMPLETED_SENTINEL, KeySchema};
use crate::storage::KeyValueStore;
use crate::{LevelUpError, WorldId};

/// World completion and reward tracker over a borrowed store and event sink.
pub struct WorldStorage<'a, S: KeyValueStore, E: EventSink> {
    store: &'a mut S,
    events: &'a E,
    keys: &'a KeySchema,
}

impl<'a, S: KeyValueStore, E: EventSink> WorldStorage<'a, S, E> {
    /// Create a tracker view.
    pub fn new(store: &'a mut S, events: &'a E, keys: &'a KeySchema) -> Self {
        Self {
            store,
            events,
            keys,
        }
    }

    /// Mark the world completed (or not) and notify.
    pub fn set_completed(
        &mut self,
        world: &WorldId,
        completed: bool,
    ) -> Result<(), LevelUpError> {
        self.set_completed_with_notify(world, completed, true)
    }

    /// Mark the world completed (or not).
    ///
    /// Requesting the current status is a no-op: nothing is written and no
    /// event is posted. Completing writes the sentinel and posts
    /// `WorldCompleted` when `notify` is set. Un-completing deletes the key
    /// and never posts.
    pub fn set_completed_with_notify(
        &mut self,
        world: &WorldId,
        completed: bool,
        notify: bool,
    ) -> Result<(), LevelUpError> {
        if self.is_completed(world)? == completed {
            return Ok(());
        }

        let key = self.keys.world_completed(world);
        if completed {
            self.store.set(&key, COMPLETED_SENTINEL)?;
            tracing::debug!(world = %world, "world marked completed");

            if notify {
                self.events.post(LevelUpEvent::WorldCompleted {
                    world_id: world.clone(),
                });
            }
        } else {
            self.store.delete(&key)?;
            tracing::debug!(world = %world, "world completion cleared");
        }
        Ok(())
    }

    /// Whether the completion key holds a non-empty value.
    pub fn is_completed(&self, world: &WorldId) -> Result<bool, LevelUpError> {
        let key = self.keys.world_completed(world);
        Ok(self.store.get(&key)?.is_some_and(|v| !v.is_empty()))
    }

    /// Assign a reward to the world, or clear it with `None` / `""`.
    ///
    /// Always posts `WorldAssignedReward`, whether or not the stored value
    /// changed.
    pub fn set_reward(
        &mut self,
        world: &WorldId,
        reward: Option<&str>,
    ) -> Result<(), LevelUpError> {
        let key = self.keys.world_assigned_reward(world);
        match reward.filter(|r| !r.is_empty()) {
            Some(reward_id) => {
                self.store.set(&key, reward_id)?;
                tracing::debug!(world = %world, reward = reward_id, "world reward assigned");
            }
            None => {
                self.store.delete(&key)?;
                tracing::debug!(world = %world, "world reward cleared");
            }
        }

        self.events.post(LevelUpEvent::WorldAssignedReward {
            world_id: world.clone(),
        });
        Ok(())
    }

    /// The reward assigned to the world, if any.
    pub fn assigned_reward(&self, world: &WorldId) -> Result<Option<String>, LevelUpError> {
        let key = self.keys.world_assigned_reward(world);
        Ok(self.store.get(&key)?.filter(|v| !v.is_empty()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::mpsc;

    /// Serves preset values; every write fails.
    struct FailingStore(MemoryStore);

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, LevelUpError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), LevelUpError> {
            Err(LevelUpError::Storage("disk full".to_string()))
        }

        fn delete(&mut self, _key: &str) -> Result<(), LevelUpError> {
            Err(LevelUpError::Storage("disk full".to_string()))
        }
    }

    fn w1() -> WorldId {
        WorldId::new("w1")
    }

    fn drain(rx: &mpsc::Receiver<LevelUpEvent>) -> Vec<LevelUpEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn not_completed_by_default() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        let worlds = WorldStorage::new(&mut store, &(), &keys);

        assert!(!worlds.is_completed(&w1()).expect("read"));
        assert_eq!(worlds.assigned_reward(&w1()).expect("read"), None);
    }

    #[test]
    fn completion_is_idempotent() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        worlds.set_completed(&w1(), true).expect("complete");
        assert!(worlds.is_completed(&w1()).expect("read"));
        assert_eq!(
            drain(&rx),
            vec![LevelUpEvent::WorldCompleted { world_id: w1() }]
        );

        worlds.set_completed(&w1(), true).expect("complete again");
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn uncompleting_deletes_key_without_event() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        worlds.set_completed(&w1(), true).expect("complete");
        drain(&rx);

        worlds.set_completed(&w1(), false).expect("uncomplete");
        assert!(!worlds.is_completed(&w1()).expect("read"));
        assert!(drain(&rx).is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn completion_writes_sentinel() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        WorldStorage::new(&mut store, &(), &keys)
            .set_completed(&w1(), true)
            .expect("complete");

        assert_eq!(
            store
                .get("levelup.worlds.w1.completed")
                .expect("get")
                .as_deref(),
            Some("yes")
        );
    }

    #[test]
    fn silent_completion_still_writes() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        worlds
            .set_completed_with_notify(&w1(), true, false)
            .expect("complete");

        assert!(worlds.is_completed(&w1()).expect("read"));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn empty_completion_value_is_not_completed() {
        let mut store = MemoryStore::new();
        store.set("levelup.worlds.w1.completed", "").expect("set");
        let keys = KeySchema::default();
        let worlds = WorldStorage::new(&mut store, &(), &keys);

        assert!(!worlds.is_completed(&w1()).expect("read"));
    }

    #[test]
    fn reward_assign_and_clear_both_notify() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        worlds.set_reward(&w1(), Some("r1")).expect("assign");
        assert_eq!(
            worlds.assigned_reward(&w1()).expect("read").as_deref(),
            Some("r1")
        );

        worlds.set_reward(&w1(), Some("")).expect("clear");
        assert_eq!(worlds.assigned_reward(&w1()).expect("read"), None);

        worlds.set_reward(&w1(), None).expect("clear again");

        let expected = LevelUpEvent::WorldAssignedReward { world_id: w1() };
        assert_eq!(drain(&rx), vec![expected.clone(), expected.clone(), expected]);
    }

    #[test]
    fn reassigning_same_reward_notifies_again() {
        let mut store = MemoryStore::new();
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        worlds.set_reward(&w1(), Some("r1")).expect("assign");
        worlds.set_reward(&w1(), Some("r1")).expect("assign");

        assert_eq!(drain(&rx).len(), 2);
    }

    #[test]
    fn failed_completion_write_posts_nothing() {
        let mut store = FailingStore(MemoryStore::new());
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        assert!(matches!(
            worlds.set_completed(&w1(), true),
            Err(LevelUpError::Storage(_))
        ));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn failed_completion_delete_is_reported() {
        let mut preset = MemoryStore::new();
        preset
            .set("levelup.worlds.w1.completed", COMPLETED_SENTINEL)
            .expect("set");
        let mut store = FailingStore(preset);
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        assert!(matches!(
            worlds.set_completed(&w1(), false),
            Err(LevelUpError::Storage(_))
        ));
        assert!(worlds.is_completed(&w1()).expect("read"));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn failed_reward_write_posts_nothing() {
        let mut store = FailingStore(MemoryStore::new());
        let keys = KeySchema::default();
        let (tx, rx) = mpsc::channel();
        let mut worlds = WorldStorage::new(&mut store, &tx, &keys);

        assert!(matches!(
            worlds.set_reward(&w1(), Some("gem")),
            Err(LevelUpError::Storage(_))
        ));
        assert!(matches!(
            worlds.set_reward(&w1(), None),
            Err(LevelUpError::Storage(_))
        ));
        assert!(drain(&rx).is_empty());
    }
}
