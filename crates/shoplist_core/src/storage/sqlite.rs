//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Open file or in-memory databases and bring the `kv_entries` schema up
//!   before any entry is read or written.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; a database stamped
//!   newer than [`SCHEMA_VERSION`] is refused untouched.
//! - One row per key; `set` upserts and bumps `updated_at`.
//! - `remove` deletes the row rather than writing an empty value.

use super::{KeyValueStore, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_KV_ENTRIES: &str = "
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value store owning one SQLite connection with the schema in place.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens a database file, creating it and the schema when missing.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        open_with("file", || Connection::open(path))
    }

    /// Opens an ephemeral database.
    pub fn open_in_memory() -> StorageResult<Self> {
        open_with("memory", Connection::open_in_memory)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Reads the schema version stamped on the database.
    pub fn schema_version(&self) -> StorageResult<u32> {
        read_schema_version(&self.conn)
    }
}

fn open_with(
    mode: &'static str,
    opener: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<SqliteKvStore> {
    let started_at = Instant::now();
    info!("event=kv_open module=storage status=start mode={mode}");

    let opened = opener()
        .map_err(StorageError::from)
        .and_then(|mut conn| ensure_schema(&mut conn).map(|()| conn));
    match opened {
        Ok(conn) => {
            info!(
                "event=kv_open module=storage status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(SqliteKvStore { conn })
        }
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn ensure_schema(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let found = read_schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_ENTRIES)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!("event=kv_schema module=storage status=ok from_version={found} to_version={SCHEMA_VERSION}");
    Ok(())
}

fn read_schema_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}
