//! # redb-backed Key-Value Storage
//!
//! A durable store using the redb embedded database.
//!
//! Every `set` and `delete` runs in its own write transaction and is
//! committed before returning, so a completed call survives a crash.
//! Reads open a fresh read transaction and never observe uncommitted data.

use crate::LevelUpError;
use crate::storage::KeyValueStore;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;

/// Table for progression state: key string -> value string
const PROGRESS: TableDefinition<&str, &str> = TableDefinition::new("progress");

fn storage_err(e: impl std::fmt::Display) -> LevelUpError {
    LevelUpError::Storage(e.to_string())
}

/// A disk-backed key-value store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a progress database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LevelUpError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Create the table up front so read transactions never miss it.
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(PROGRESS).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        tracing::debug!(path = %path.as_ref().display(), "opened redb progress store");
        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>, LevelUpError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(PROGRESS).map_err(storage_err)?;
        let value = table
            .get(key)
            .map_err(storage_err)?
            .map(|v| v.value().to_string());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LevelUpError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(PROGRESS).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), LevelUpError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(PROGRESS).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
