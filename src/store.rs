//! Durable key-value storage for named record collections.
//!
//! The database lives at `~/.dealerdesk/dealerdesk.db` and holds one row per
//! named record: the full customer collection, the full inventory collection,
//! and the current-user record, each serialized as a single JSON blob. Every
//! save is a whole-blob replace — an interrupted write leaves either the old
//! or the new blob, never a mix.
//!
//! Loads never fail: a missing or corrupt blob falls back to seed data, which
//! is persisted immediately so the store is never left empty after a load.

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// A named-blob store. Injected into the registries so tests can substitute
/// `MemoryStore` for the on-disk database.
pub trait RecordStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Key-value store backed by a single-table SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `~/.dealerdesk/dealerdesk.db`.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(Self::db_path()?)
    }

    /// Open a database at an explicit path. Useful for testing.
    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(StoreError::CreateDir)?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database. Useful for testing.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;
        Ok(())
    }

    fn db_path() -> Result<PathBuf, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirNotFound)?;
        Ok(home.join(".dealerdesk").join("dealerdesk.db"))
    }

    /// The path the default store opens, for diagnostics.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        Self::db_path()
    }
}

impl RecordStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO records (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM records WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store, primarily a test double.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.records.lock().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Collection load/save
// ---------------------------------------------------------------------------

/// Load a named collection, falling back to seed data on a missing or
/// unreadable blob and running a one-time forward migration on success.
///
/// Never fails. A corrupt blob is treated as absent; the seed (or the
/// migrated collection, when the migration changed anything) is persisted
/// before returning, so a load always leaves the record present.
pub fn load_collection<T, S, F, M>(store: &S, key: &str, seed: F, migrate: M) -> Vec<T>
where
    T: Serialize + DeserializeOwned,
    S: RecordStore + ?Sized,
    F: FnOnce() -> Vec<T>,
    M: FnOnce(&mut Vec<T>) -> bool,
{
    let raw = match store.get(key) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("failed to read record '{key}': {e}; falling back to seed data");
            None
        }
    };

    if let Some(raw) = raw {
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(mut items) => {
                if migrate(&mut items) {
                    log::info!("record '{key}' migrated; persisting backfilled collection");
                    if let Err(e) = save_collection(store, key, &items) {
                        log::warn!("failed to persist migrated record '{key}': {e}");
                    }
                }
                return items;
            }
            Err(e) => {
                log::warn!("record '{key}' is corrupt ({e}); reseeding");
            }
        }
    }

    let items = seed();
    log::info!("seeding record '{key}' with {} entries", items.len());
    if let Err(e) = save_collection(store, key, &items) {
        log::warn!("failed to persist seed data for '{key}': {e}");
    }
    items
}

/// Whole-collection replace of a named record.
pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: RecordStore + ?Sized,
{
    let raw = serde_json::to_string(items)?;
    store.put(key, &raw)
}
