//! Local key-value storage contracts and backends.
//!
//! # Responsibility
//! - Model a synchronous string-keyed store with whole-value replace semantics.
//! - Keep backend details (SQLite, process memory) out of list orchestration.
//!
//! # Invariants
//! - `get` on a missing key returns `Ok(None)`, never an empty string.
//! - `remove` deletes the entry; a later `get` reports it absent.
//! - `set` replaces the full value; there is no partial update.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::{SqliteKvStore, SCHEMA_VERSION};

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure while reading or writing a store entry.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The database was written by a newer build.
    UnsupportedSchema { found: u32, supported: u32 },
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchema { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchema { .. } | Self::Backend(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
