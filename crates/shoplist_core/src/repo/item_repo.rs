//! Persisted list accessors over a key-value store.
//!
//! # Responsibility
//! - Encode the ordered item list as one JSON array entry.
//! - Provide whole-list read, append, exact-text removal and clear paths.
//!
//! # Invariants
//! - A missing entry reads back as an empty list.
//! - Every mutation rewrites the full array in one `set` call.
//! - `clear` deletes the entry instead of writing `[]`.
//! - Read paths reject corrupt entries instead of masking them.
//! - No deduplication happens here; callers enforce uniqueness first.

use crate::model::item::{fold_case, Item};
use crate::storage::{KeyValueStore, StorageError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default storage entry name for the list.
pub const DEFAULT_STORAGE_KEY: &str = "items";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised while reading or writing the persisted list.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted list data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Repository for the single persisted item list.
pub struct ItemRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ItemRepository<S> {
    /// Creates a repository using [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the full list in storage order.
    pub fn load(&self) -> RepoResult<Vec<Item>> {
        let Some(raw) = self.store.get(self.key.as_str())? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<Item>>(raw.as_str()).map_err(|err| {
            RepoError::InvalidData(format!("entry `{}` is not a JSON item array: {err}", self.key))
        })
    }

    /// Returns whether an entry for the list key exists at all.
    pub fn has_entry(&self) -> RepoResult<bool> {
        Ok(self.store.get(self.key.as_str())?.is_some())
    }

    /// Case-insensitive membership test.
    pub fn contains_ignore_case(&self, text: &str) -> RepoResult<bool> {
        let needle = fold_case(text);
        Ok(self.load()?.iter().any(|item| item.key() == needle))
    }

    /// Appends one item at the end of the list.
    pub fn append(&mut self, item: &Item) -> RepoResult<()> {
        let mut items = self.load()?;
        items.push(item.clone());
        self.save(&items)
    }

    /// Removes the first entry whose text equals `text` exactly.
    ///
    /// Returns `false` and leaves storage untouched when nothing matches.
    pub fn remove_exact(&mut self, text: &str) -> RepoResult<bool> {
        let mut items = self.load()?;
        let Some(position) = items.iter().position(|item| item.as_str() == text) else {
            return Ok(false);
        };
        items.remove(position);
        self.save(&items)?;
        Ok(true)
    }

    /// Removes `previous` (exact text) and appends `next` in one write.
    pub fn replace(&mut self, previous: &str, next: &Item) -> RepoResult<()> {
        let mut items = self.load()?;
        if let Some(position) = items.iter().position(|item| item.as_str() == previous) {
            items.remove(position);
        }
        items.push(next.clone());
        self.save(&items)
    }

    /// Deletes the storage entry.
    pub fn clear(&mut self) -> RepoResult<()> {
        self.store.remove(self.key.as_str())?;
        Ok(())
    }

    fn save(&mut self, items: &[Item]) -> RepoResult<()> {
        let encoded = serde_json::to_string(items)
            .map_err(|err| RepoError::InvalidData(format!("failed to encode list: {err}")))?;
        self.store.set(self.key.as_str(), encoded.as_str())?;
        Ok(())
    }
}
