//! Core domain logic for Marknote.
//! This crate is the single source of truth for note/tag invariants and for
//! the snapshot persistence they are mirrored to.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NoteId, NoteView, StoredNote};
pub use model::tag::{Tag, TagId};
pub use repo::notebook_repo::{
    NotebookRepository, PersistedNotebookRepository, NOTES_KEY, TAGS_KEY,
};
pub use service::notebook_service::{NoteDraft, NoteListFilter, NotebookService};
pub use store::cell::PersistedCell;
pub use store::kv::{KeyValueStore, SqliteKeyValueStore};
pub use store::{open_store, open_store_in_memory, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
