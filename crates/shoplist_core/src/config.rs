//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path, storage key and logging settings once, with
//!   defaults, so CLI and FFI entry points agree.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `storage_key` is never empty.

use crate::logging::default_log_level;
use crate::repo::item_repo::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SHOPLIST_DB_PATH";
pub const ENV_STORAGE_KEY: &str = "SHOPLIST_STORAGE_KEY";
pub const ENV_LOG_LEVEL: &str = "SHOPLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SHOPLIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "shoplist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Entry name holding the JSON item array.
    pub storage_key: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; file logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ListConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            storage_key: read(ENV_STORAGE_KEY).unwrap_or(defaults.storage_key),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}
