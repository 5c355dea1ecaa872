//! # Key-Value Storage
//!
//! The narrow storage capability the trackers depend on: get, set and delete
//! by string key. Values are strings; the trackers decide their encoding.
//!
//! ## Backends
//!
//! - `MemoryStore`: `BTreeMap` in memory (fast, volatile)
//! - `RedbStore`: redb embedded database (ACID, persistent)
//! - `StorageBackend`: runtime selection between the two

mod redb_store;

pub use redb_store::RedbStore;

use crate::LevelUpError;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// KEYVALUESTORE TRAIT
// =============================================================================

/// A synchronous string-to-string store.
///
/// Writes are last-write-wins per key. No operation spans more than one key.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, LevelUpError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), LevelUpError>;

    /// Remove `key`. Deleting an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), LevelUpError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, LevelUpError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LevelUpError> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<(), LevelUpError> {
        (**self).delete(key)
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Volatile store backed by a `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LevelUpError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LevelUpError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), LevelUpError> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// STORAGE BACKEND SELECTION
// =============================================================================

/// Storage backend chosen at runtime.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory map (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed redb database (ACID, persistent).
    Persistent(RedbStore),
}

impl StorageBackend {
    /// Open (or create) a persistent backend at `path`.
    pub fn open_redb(path: impl AsRef<Path>) -> Result<Self, LevelUpError> {
        Ok(Self::Persistent(RedbStore::open(path)?))
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

impl KeyValueStore for StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, LevelUpError> {
        match self {
            Self::InMemory(s) => s.get(key),
            Self::Persistent(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LevelUpError> {
        match self {
            Self::InMemory(s) => s.set(key, value),
            Self::Persistent(s) => s.set(key, value),
        }
    }

    fn delete(&mut self, key: &str) -> Result<(), LevelUpError> {
        match self {
            Self::InMemory(s) => s.delete(key),
            Self::Persistent(s) => s.delete(key),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
