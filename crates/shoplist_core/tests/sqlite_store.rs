use rusqlite::Connection;
use shoplist_core::{KeyValueStore, SqliteKvStore, StorageError, SCHEMA_VERSION};

#[test]
fn fresh_store_is_stamped_and_empty() {
    let store = SqliteKvStore::open_in_memory().unwrap();

    assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    assert_eq!(store.get("items").unwrap(), None);
}

#[test]
fn entries_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoplist.db");

    let mut first = SqliteKvStore::open(&path).unwrap();
    first.set("items", r#"["Milk","Eggs"]"#).unwrap();
    first.set("hardware", r#"["Nails"]"#).unwrap();
    first.remove("hardware").unwrap();
    drop(first);

    let second = SqliteKvStore::open(&path).unwrap();
    assert_eq!(second.schema_version().unwrap(), SCHEMA_VERSION);
    assert_eq!(
        second.get("items").unwrap().as_deref(),
        Some(r#"["Milk","Eggs"]"#)
    );
    assert_eq!(second.get("hardware").unwrap(), None);
}

#[test]
fn upsert_advances_updated_at_and_keeps_one_row() {
    let mut store = SqliteKvStore::open_in_memory().unwrap();
    store.set("items", r#"["Milk"]"#).unwrap();
    store
        .connection()
        .execute("UPDATE kv_entries SET updated_at = 0 WHERE key = 'items';", [])
        .unwrap();

    store.set("items", r#"["Milk","Jam"]"#).unwrap();

    let (count, updated_at): (i64, i64) = store
        .connection()
        .query_row("SELECT COUNT(*), MAX(updated_at) FROM kv_entries;", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(count, 1);
    assert!(updated_at > 0);
}

#[test]
fn newer_schema_is_refused_and_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (key TEXT PRIMARY KEY, value TEXT NOT NULL);
         INSERT INTO kv_entries (key, value) VALUES ('items', '[\"Milk\"]');
         PRAGMA user_version = 7;",
    )
    .unwrap();
    drop(conn);

    match SqliteKvStore::open(&path) {
        Err(StorageError::UnsupportedSchema { found, supported }) => {
            assert_eq!(found, 7);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema should be refused"),
    }

    let conn = Connection::open(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    let value: String = conn
        .query_row("SELECT value FROM kv_entries WHERE key = 'items';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(version, 7);
    assert_eq!(value, "[\"Milk\"]");
}
