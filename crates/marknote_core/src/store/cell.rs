//! Persisted typed cell: one value, one key, snapshot kept in lockstep.
//!
//! # Responsibility
//! - Initialize from an existing snapshot or a caller-supplied default.
//! - Serve reads from memory and mirror every write back to the medium.
//!
//! # Invariants
//! - After a write returns `Ok`, the persisted snapshot deserializes to the
//!   current in-memory value.
//! - A snapshot that fails to deserialize aborts construction; there is no
//!   recovery path and no snapshot versioning.
//!
//! # See also
//! - docs/architecture/storage.md

use crate::store::kv::KeyValueStore;
use crate::store::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed value bound to one fixed key of a [`KeyValueStore`].
///
/// Reads never touch the medium; writes replace the in-memory value and
/// synchronously persist its JSON snapshot before returning.
#[derive(Debug)]
pub struct PersistedCell<T, K> {
    store: K,
    key: String,
    value: T,
}

impl<T, K> PersistedCell<T, K>
where
    T: Serialize + DeserializeOwned,
    K: KeyValueStore,
{
    /// Initializes from the snapshot under `key`, falling back to `default`.
    ///
    /// A missing snapshot is seeded immediately with the default value.
    pub fn with_default(store: K, key: impl Into<String>, default: T) -> StoreResult<Self> {
        Self::init(store, key.into(), || default)
    }

    /// Initializes from the snapshot under `key`, falling back to the value
    /// produced by `default_fn`.
    ///
    /// The supplier is invoked at most once, and only when no snapshot
    /// exists; use this constructor when the default is expensive to build.
    pub fn with_default_fn(
        store: K,
        key: impl Into<String>,
        default_fn: impl FnOnce() -> T,
    ) -> StoreResult<Self> {
        Self::init(store, key.into(), default_fn)
    }

    fn init(store: K, key: String, default_fn: impl FnOnce() -> T) -> StoreResult<Self> {
        match store.read_entry(&key)? {
            Some(snapshot) => {
                let value = serde_json::from_str(&snapshot).map_err(|source| {
                    StoreError::CorruptSnapshot {
                        key: key.clone(),
                        source,
                    }
                })?;
                Ok(Self { store, key, value })
            }
            None => {
                let cell = Self {
                    store,
                    key,
                    value: default_fn(),
                };
                cell.persist()?;
                Ok(cell)
            }
        }
    }

    /// Returns the key this cell is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the current in-memory value. No I/O.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and persists its snapshot.
    pub fn set(&mut self, value: T) -> StoreResult<()> {
        self.value = value;
        self.persist()
    }

    /// Replaces the value with `rewrite(old)` and persists its snapshot.
    pub fn update(&mut self, rewrite: impl FnOnce(&T) -> T) -> StoreResult<()> {
        let next = rewrite(&self.value);
        self.set(next)
    }

    fn persist(&self) -> StoreResult<()> {
        let snapshot =
            serde_json::to_string(&self.value).map_err(|source| StoreError::EncodeSnapshot {
                key: self.key.clone(),
                source,
            })?;
        self.store.write_entry(&self.key, &snapshot)
    }
}
