//! Key-value medium contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and upsert string entries addressed by fixed keys.
//! - Guard that a connection actually carries the expected schema before
//!   handing out a usable handle.
//!
//! # Invariants
//! - One key holds at most one entry; writes replace the whole entry.

use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection};

/// Durable key-value medium behind [`crate::store::cell::PersistedCell`].
///
/// Writes are synchronous; when `write_entry` returns `Ok`, the entry is
/// durable as far as the medium is concerned.
pub trait KeyValueStore {
    /// Returns the entry stored under `key`, or `None` when absent.
    fn read_entry(&self, key: &str) -> StoreResult<Option<String>>;
    /// Inserts or replaces the entry stored under `key`.
    fn write_entry(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// SQLite-backed key-value medium over the `kv_entries` table.
#[derive(Debug)]
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Constructs a handle from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn read_entry(&self, key: &str) -> StoreResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv_entries WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn write_entry(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    if !table_exists(conn, "kv_entries")? {
        return Err(StoreError::MissingRequiredTable("kv_entries"));
    }

    for column in ["key", "value"] {
        if !table_has_column(conn, "kv_entries", column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: "kv_entries",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
