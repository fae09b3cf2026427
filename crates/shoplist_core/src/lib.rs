//! Core list logic for Shoplist.
//! This crate is the single source of truth for list invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use config::ListConfig;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::item::{Item, ItemValidationError};
pub use prompt::{ScriptedPrompt, UserPrompt};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, DEFAULT_STORAGE_KEY};
pub use service::list_controller::{
    EditState, IntentError, IntentResult, ListController, SubmitOutcome,
};
pub use storage::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult, SCHEMA_VERSION,
};
pub use view::affordance::{Affordances, SubmitMode};
pub use view::rendered_list::{RenderedList, Row, RowId};
pub use view::{ListSnapshot, RowSnapshot};

/// Opens the configured SQLite store and renders its list.
pub fn open_list(config: &ListConfig) -> Result<ListController<SqliteKvStore>, IntentError> {
    let store = SqliteKvStore::open(&config.db_path).map_err(RepoError::from)?;
    let repo = ItemRepository::with_key(store, config.storage_key.clone());
    ListController::load(repo)
}

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
