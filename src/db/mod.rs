//! Key-value persistence.
//!
//! Everything the journal stores is a JSON blob under a string key. The
//! [`KeyValueStore`] trait is the only seam the rest of the crate sees;
//! `MemoryStore` backs tests and ephemeral sessions, `SqliteStore` backs
//! the on-disk journal.

pub mod memory;
pub mod sqlite;

pub use memory::*;
pub use sqlite::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Atomic get/set/remove of JSON blobs by key, last write wins.
///
/// No cross-key transactions. Callers doing read-modify-write (the journal)
/// assume a single writer per store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, DatabaseError>;
    fn set(&self, key: &str, value: &Value) -> Result<(), DatabaseError>;
    fn remove(&self, key: &str) -> Result<(), DatabaseError>;
}

/// Reads and decodes the blob under `key`. `None` when the key is absent.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, DatabaseError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Encodes `value` and writes it under `key`.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), DatabaseError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_value(value)?;
    store.set(key, &encoded)
}
