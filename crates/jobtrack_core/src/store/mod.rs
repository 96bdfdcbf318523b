//! Key-value record store.
//!
//! # Responsibility
//! - Define the key-value surface the application repository writes through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `set_item` inserts or replaces; it never merges values.
//! - `remove_item` on a missing key is a no-op, not an error.
//! - `multi_get` answers in request order, `None` for absent keys.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Store refused the operation (read-only or injected failure).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "record store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value persistence surface holding one serialized value per key.
pub trait RecordStore {
    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;
    /// Reads one value.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Enumerates every key currently stored.
    fn get_all_keys(&self) -> StoreResult<Vec<String>>;
    /// Bulk-reads values for `keys`, preserving request order.
    fn multi_get(&self, keys: &[String]) -> StoreResult<Vec<(String, Option<String>)>>;
    /// Deletes `key` if present.
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get_item(key)?.is_some())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn get_all_keys(&self) -> StoreResult<Vec<String>> {
        (**self).get_all_keys()
    }

    fn multi_get(&self, keys: &[String]) -> StoreResult<Vec<(String, Option<String>)>> {
        (**self).multi_get(keys)
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        (**self).contains_key(key)
    }
}
