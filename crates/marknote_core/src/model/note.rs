//! Note entities: stored form and resolved view form.

use crate::model::tag::{Tag, TagId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Persisted form of a note.
///
/// `tag_ids` holds foreign keys into the tag collection. Duplicates are not
/// prevented and order is preserved without carrying meaning. Deleting a tag
/// leaves its id in place here; resolution filters it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    /// Stable note id used for routing and snapshot identity.
    pub id: NoteId,
    pub title: String,
    /// Raw markdown source text.
    pub markdown: String,
    /// Serialized as `tagIds` to match the snapshot format.
    #[serde(rename = "tagIds")]
    pub tag_ids: Vec<TagId>,
}

impl StoredNote {
    /// Creates a note with a generated stable id.
    pub fn new(
        title: impl Into<String>,
        markdown: impl Into<String>,
        tag_ids: Vec<TagId>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, markdown, tag_ids)
    }

    /// Creates a note with a caller-provided stable id.
    ///
    /// Used by update paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        markdown: impl Into<String>,
        tag_ids: Vec<TagId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            markdown: markdown.into(),
            tag_ids,
        }
    }
}

/// Read-only projection of a stored note with its tag ids resolved into the
/// tag objects currently present in the tag collection.
///
/// Computed on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    /// Resolved tags in the tag collection's current order.
    pub tags: Vec<Tag>,
}
