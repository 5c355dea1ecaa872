//! # Progress Module
//!
//! `LevelUp` ties a key-value store, an event sink and a key schema
//! together and hands out tracker views over them.
//!
//! The trackers themselves hold no state; a view only borrows the store
//! and sink for as long as it is used.
//!
//! ## Storage Backends
//!
//! Any `KeyValueStore` works. `StorageBackend` selects between the
//! in-memory and redb stores at runtime.

use crate::LevelUpError;
use crate::events::EventSink;
use crate::keys::KeySchema;
use crate::mission::MissionStorage;
use crate::storage::{KeyValueStore, MemoryStore, StorageBackend};
use crate::world::WorldStorage;
use std::path::Path;

/// Progression state over an injected store and event sink.
#[derive(Debug)]
pub struct LevelUp<S: KeyValueStore, E: EventSink> {
    store: S,
    events: E,
    keys: KeySchema,
}

impl<E: EventSink> LevelUp<MemoryStore, E> {
    /// Create progression state backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(events: E) -> Self {
        Self::new(MemoryStore::new(), events)
    }
}

impl<E: EventSink> LevelUp<StorageBackend, E> {
    /// Create progression state backed by a redb database at `path`.
    ///
    /// Opens or creates the database. Every write is committed before the
    /// call returns.
    pub fn with_redb(path: impl AsRef<Path>, events: E) -> Result<Self, LevelUpError> {
        Ok(Self::new(StorageBackend::open_redb(path)?, events))
    }
}

impl<S: KeyValueStore, E: EventSink> LevelUp<S, E> {
    /// Create progression state with the default key prefix.
    pub fn new(store: S, events: E) -> Self {
        Self::with_keys(store, events, KeySchema::default())
    }

    /// Create progression state with a custom key schema.
    pub fn with_keys(store: S, events: E, keys: KeySchema) -> Self {
        Self {
            store,
            events,
            keys,
        }
    }

    /// Mission completion tracker.
    pub fn missions(&mut self) -> MissionStorage<'_, S, E> {
        MissionStorage::new(&mut self.store, &self.events, &self.keys)
    }

    /// World completion and reward tracker.
    pub fn worlds(&mut self) -> WorldStorage<'_, S, E> {
        WorldStorage::new(&mut self.store, &self.events, &self.keys)
    }

    /// The key schema in use.
    #[must_use]
    pub fn keys(&self) -> &KeySchema {
        &self.keys
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The event sink.
    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Release the store and sink.
    pub fn into_parts(self) -> (S, E) {
        (self.store, self.events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
