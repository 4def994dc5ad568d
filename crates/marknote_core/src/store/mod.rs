//! Durable key-value storage and the persisted cell built on top of it.
//!
//! # Responsibility
//! - Open and prepare the SQLite file that acts as the local key-value
//!   medium (one `kv_entries` table, key -> JSON snapshot text).
//! - Provide [`cell::PersistedCell`], the typed value that mirrors every
//!   in-memory change back to its snapshot.
//!
//! # Invariants
//! - Each snapshot lives under one fixed string key and holds one
//!   JSON-serialized value.
//! - Snapshots carry no version field; a snapshot that fails to deserialize
//!   is fatal at initialization.
//!
//! # See also
//! - docs/architecture/storage.md

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cell;
pub mod kv;
pub mod migrations;
mod open;

pub use open::{open_store, open_store_in_memory};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for medium bootstrap and snapshot handling.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The database file was written by a newer build of this library.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A persisted snapshot exists but cannot be deserialized.
    CorruptSnapshot {
        key: String,
        source: serde_json::Error,
    },
    /// The in-memory value could not be serialized for write-back.
    EncodeSnapshot {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "store connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "store connection is missing required column `{table}.{column}`"
            ),
            Self::CorruptSnapshot { key, source } => {
                write!(f, "corrupt snapshot under key `{key}`: {source}")
            }
            Self::EncodeSnapshot { key, source } => {
                write!(f, "cannot encode snapshot under key `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::CorruptSnapshot { source, .. } | Self::EncodeSnapshot { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
