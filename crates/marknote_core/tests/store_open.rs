use marknote_core::store::migrations::latest_version;
use marknote_core::{
    open_store, open_store_in_memory, KeyValueStore, SqliteKeyValueStore, StoreError,
};
use rusqlite::Connection;

#[test]
fn open_store_in_memory_creates_kv_schema() {
    let conn = open_store_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn opening_same_store_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marknote.db");

    {
        let conn = open_store(&path).unwrap();
        assert_eq!(schema_version(&conn), latest_version());
        let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
        kv.write_entry("PROBE", "survives reopen").unwrap();
    }

    let conn = open_store(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(
        kv.read_entry("PROBE").unwrap().as_deref(),
        Some("survives reopen")
    );
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_store(&path).unwrap_err();
    match err {
        StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn kv_store_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteKeyValueStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("kv_entries"))
    ));
}

#[test]
fn kv_store_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE kv_entries (key TEXT PRIMARY KEY NOT NULL);")
        .unwrap();

    let result = SqliteKeyValueStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredColumn {
            table: "kv_entries",
            column: "value"
        })
    ));
}

#[test]
fn kv_entries_are_read_back_and_overwritten_in_place() {
    let conn = open_store_in_memory().unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(kv.read_entry("NOTES").unwrap(), None);

    kv.write_entry("NOTES", "[]").unwrap();
    assert_eq!(kv.read_entry("NOTES").unwrap().as_deref(), Some("[]"));

    kv.write_entry("NOTES", "[1]").unwrap();
    assert_eq!(kv.read_entry("NOTES").unwrap().as_deref(), Some("[1]"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
