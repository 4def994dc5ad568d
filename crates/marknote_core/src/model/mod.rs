//! Domain model for notes and tags.
//!
//! # Responsibility
//! - Define the stored shapes that are mirrored to persisted snapshots.
//! - Define the computed view shape that joins notes with their tags.
//!
//! # Invariants
//! - Note ids are unique within the note collection; tag ids are unique
//!   within the tag collection.
//! - A note's `tag_ids` may reference tags that no longer exist; the view
//!   projection filters those out.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
pub mod tag;
