//! Note/tag collection contracts and the persisted implementation.
//!
//! # Responsibility
//! - Express every mutation as a pure copy-on-write rewrite of one whole
//!   collection.
//! - Own the fixed snapshot keys for the note and tag collections.
//!
//! # Invariants
//! - Rewrites targeting an id that is not present are silent no-ops.
//! - `remove_tag` never touches any note's `tag_ids`; dangling references
//!   are tolerated and resolved away at view time.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::note::{NoteId, StoredNote};
use crate::model::tag::Tag;
use crate::store::cell::PersistedCell;
use crate::store::kv::{KeyValueStore, SqliteKeyValueStore};
use crate::store::StoreResult;
use rusqlite::Connection;

/// Snapshot key of the note collection.
pub const NOTES_KEY: &str = "NOTES";
/// Snapshot key of the tag collection.
pub const TAGS_KEY: &str = "TAGS";

/// Appends a note, leaving the existing elements untouched.
pub fn append_note(notes: &[StoredNote], note: StoredNote) -> Vec<StoredNote> {
    let mut next = notes.to_vec();
    next.push(note);
    next
}

/// Replaces the note whose id matches `replacement` wholesale.
///
/// Notes with other ids pass through unchanged; no match means no change.
pub fn replace_note(notes: &[StoredNote], replacement: &StoredNote) -> Vec<StoredNote> {
    notes
        .iter()
        .map(|note| {
            if note.id == replacement.id {
                replacement.clone()
            } else {
                note.clone()
            }
        })
        .collect()
}

/// Removes the note with the given id, if present.
pub fn remove_note(notes: &[StoredNote], id: NoteId) -> Vec<StoredNote> {
    notes.iter().filter(|note| note.id != id).cloned().collect()
}

/// Appends a tag, leaving the existing elements untouched.
pub fn append_tag(tags: &[Tag], tag: Tag) -> Vec<Tag> {
    let mut next = tags.to_vec();
    next.push(tag);
    next
}

/// Replaces the label of the tag with the given id, if present.
pub fn relabel_tag(tags: &[Tag], id: &str, label: &str) -> Vec<Tag> {
    tags.iter()
        .map(|tag| {
            if tag.id == id {
                Tag {
                    id: tag.id.clone(),
                    label: label.to_string(),
                }
            } else {
                tag.clone()
            }
        })
        .collect()
}

/// Removes the tag with the given id, if present.
///
/// Notes referencing the id keep it in their `tag_ids`.
pub fn remove_tag(tags: &[Tag], id: &str) -> Vec<Tag> {
    tags.iter().filter(|tag| tag.id != id).cloned().collect()
}

/// Returns the subset of `tags` referenced by the note's `tag_ids`, in the
/// tag collection's current order.
pub fn resolve_tags(note: &StoredNote, tags: &[Tag]) -> Vec<Tag> {
    tags.iter()
        .filter(|tag| note.tag_ids.contains(&tag.id))
        .cloned()
        .collect()
}

/// Collection access contract for note/tag use-cases.
pub trait NotebookRepository {
    /// Current note collection snapshot.
    fn notes(&self) -> &[StoredNote];
    /// Current tag collection snapshot.
    fn tags(&self) -> &[Tag];
    /// Appends one note.
    fn insert_note(&mut self, note: StoredNote) -> StoreResult<()>;
    /// Replaces the note matching `replacement.id`; no-op when absent.
    fn replace_note(&mut self, replacement: &StoredNote) -> StoreResult<()>;
    /// Removes the note with the given id; no-op when absent.
    fn remove_note(&mut self, id: NoteId) -> StoreResult<()>;
    /// Appends one tag.
    fn insert_tag(&mut self, tag: Tag) -> StoreResult<()>;
    /// Replaces the label of the tag with the given id; no-op when absent.
    fn relabel_tag(&mut self, id: &str, label: &str) -> StoreResult<()>;
    /// Removes the tag with the given id; no-op when absent.
    fn remove_tag(&mut self, id: &str) -> StoreResult<()>;
}

/// Repository keeping both collections mirrored to persisted snapshots.
pub struct PersistedNotebookRepository<K: KeyValueStore> {
    notes: PersistedCell<Vec<StoredNote>, K>,
    tags: PersistedCell<Vec<Tag>, K>,
}

impl<'conn> PersistedNotebookRepository<SqliteKeyValueStore<'conn>> {
    /// Constructs a repository from a bootstrapped store connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let notes_store = SqliteKeyValueStore::try_new(conn)?;
        let tags_store = SqliteKeyValueStore::try_new(conn)?;
        Self::with_stores(notes_store, tags_store)
    }
}

impl<K: KeyValueStore> PersistedNotebookRepository<K> {
    /// Constructs a repository over explicit medium handles.
    ///
    /// Both collections initialize empty when no snapshot exists yet.
    pub fn with_stores(notes_store: K, tags_store: K) -> StoreResult<Self> {
        Ok(Self {
            notes: PersistedCell::with_default(notes_store, NOTES_KEY, Vec::new())?,
            tags: PersistedCell::with_default(tags_store, TAGS_KEY, Vec::new())?,
        })
    }
}

impl<K: KeyValueStore> NotebookRepository for PersistedNotebookRepository<K> {
    fn notes(&self) -> &[StoredNote] {
        self.notes.get()
    }

    fn tags(&self) -> &[Tag] {
        self.tags.get()
    }

    fn insert_note(&mut self, note: StoredNote) -> StoreResult<()> {
        self.notes.update(|notes| append_note(notes, note))
    }

    fn replace_note(&mut self, replacement: &StoredNote) -> StoreResult<()> {
        self.notes.update(|notes| replace_note(notes, replacement))
    }

    fn remove_note(&mut self, id: NoteId) -> StoreResult<()> {
        self.notes.update(|notes| remove_note(notes, id))
    }

    fn insert_tag(&mut self, tag: Tag) -> StoreResult<()> {
        self.tags.update(|tags| append_tag(tags, tag))
    }

    fn relabel_tag(&mut self, id: &str, label: &str) -> StoreResult<()> {
        self.tags.update(|tags| relabel_tag(tags, id, label))
    }

    fn remove_tag(&mut self, id: &str) -> StoreResult<()> {
        self.tags.update(|tags| remove_tag(tags, id))
    }
}
