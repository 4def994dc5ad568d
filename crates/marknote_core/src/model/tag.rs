//! Tag entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a tag.
///
/// Tags keep opaque string ids because callers may supply their own identity
/// scheme; the convenience constructor generates a UUIDv4 string.
pub type TagId = String;

/// User-defined label, independently created, relabeled and deleted, and
/// referenced by notes via [`TagId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Assigned at creation, immutable thereafter.
    pub id: TagId,
    /// Display label, mutable.
    pub label: String,
}

impl Tag {
    /// Creates a tag with a generated UUIDv4 id.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), label)
    }

    /// Creates a tag with a caller-supplied id.
    ///
    /// Id uniqueness within the tag collection is the caller's discipline;
    /// the collection does not enforce it.
    pub fn with_id(id: impl Into<TagId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
