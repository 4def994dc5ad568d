//! Note/tag use-case service.
//!
//! # Responsibility
//! - Map drafts (tags as objects) to stored notes (tags as ids).
//! - Assign fresh note identity on creation.
//! - Compute resolved views and list filtering on demand.
//!
//! # Invariants
//! - Updates and deletes targeting an absent id are silent no-ops.
//! - Resolved views are recomputed from current state and never persisted.
//! - Drafts are stored as given; input validation belongs to the UI layer.

use crate::model::note::{NoteId, NoteView, StoredNote};
use crate::model::tag::{Tag, TagId};
use crate::repo::notebook_repo::{resolve_tags, NotebookRepository};
use crate::store::StoreResult;

/// Creation/update input for a note, carrying whole tag objects.
///
/// The stored form keeps only the tag ids; the objects are what form layers
/// naturally hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

/// Filter options for note listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListFilter {
    /// Case-insensitive title substring match.
    pub title: Option<String>,
    /// Every listed note must carry all of these tags among its resolved
    /// tags; dangling references never satisfy the filter.
    pub tag_ids: Vec<TagId>,
}

/// Use-case facade over a [`NotebookRepository`].
pub struct NotebookService<R: NotebookRepository> {
    repo: R,
}

impl<R: NotebookRepository> NotebookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a note with a fresh id and returns its resolved view.
    ///
    /// The view's tags are the intersection of the draft's tags with the
    /// current tag collection, in tag collection order.
    pub fn create_note(&mut self, draft: NoteDraft) -> StoreResult<NoteView> {
        let NoteDraft {
            title,
            markdown,
            tags,
        } = draft;
        let tag_ids = tags.into_iter().map(|tag| tag.id).collect();
        let note = StoredNote::new(title, markdown, tag_ids);

        self.repo.insert_note(note.clone())?;
        Ok(resolve_view(&note, self.repo.tags()))
    }

    /// Replaces title, markdown and tag references of the note with the
    /// given id. Silent no-op when the id does not exist.
    pub fn update_note(&mut self, id: NoteId, draft: NoteDraft) -> StoreResult<()> {
        let NoteDraft {
            title,
            markdown,
            tags,
        } = draft;
        let tag_ids = tags.into_iter().map(|tag| tag.id).collect();
        let replacement = StoredNote::with_id(id, title, markdown, tag_ids);
        self.repo.replace_note(&replacement)
    }

    /// Removes the note with the given id. Silent no-op when absent.
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        self.repo.remove_note(id)
    }

    /// Appends a tag. Id uniqueness is the caller's discipline.
    pub fn add_tag(&mut self, tag: Tag) -> StoreResult<()> {
        self.repo.insert_tag(tag)
    }

    /// Replaces the label of the tag with the given id. Silent no-op when
    /// absent.
    pub fn update_tag_label(&mut self, id: &str, label: &str) -> StoreResult<()> {
        self.repo.relabel_tag(id, label)
    }

    /// Removes the tag from the tag collection only; notes referencing it
    /// keep the id in their stored `tag_ids`.
    pub fn delete_tag(&mut self, id: &str) -> StoreResult<()> {
        self.repo.remove_tag(id)
    }

    /// Current tag collection snapshot.
    pub fn available_tags(&self) -> &[Tag] {
        self.repo.tags()
    }

    /// Current note collection snapshot in stored form.
    pub fn stored_notes(&self) -> &[StoredNote] {
        self.repo.notes()
    }

    /// Resolved view of one note, or `None` when the id does not exist.
    pub fn note_view(&self, id: NoteId) -> Option<NoteView> {
        self.repo
            .notes()
            .iter()
            .find(|note| note.id == id)
            .map(|note| resolve_view(note, self.repo.tags()))
    }

    /// Resolved views of all notes, in note collection order.
    pub fn notes_with_tags(&self) -> Vec<NoteView> {
        self.repo
            .notes()
            .iter()
            .map(|note| resolve_view(note, self.repo.tags()))
            .collect()
    }

    /// Resolved views matching the given filter.
    pub fn list_notes(&self, filter: &NoteListFilter) -> Vec<NoteView> {
        self.notes_with_tags()
            .into_iter()
            .filter(|view| matches_filter(view, filter))
            .collect()
    }
}

fn resolve_view(note: &StoredNote, tags: &[Tag]) -> NoteView {
    NoteView {
        id: note.id,
        title: note.title.clone(),
        markdown: note.markdown.clone(),
        tags: resolve_tags(note, tags),
    }
}

fn matches_filter(view: &NoteView, filter: &NoteListFilter) -> bool {
    if let Some(needle) = filter.title.as_deref() {
        if !view
            .title
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }

    filter
        .tag_ids
        .iter()
        .all(|id| view.tags.iter().any(|tag| &tag.id == id))
}

#[cfg(test)]
mod tests {
    use super::{matches_filter, NoteListFilter};
    use crate::model::note::NoteView;
    use crate::model::tag::Tag;
    use uuid::Uuid;

    fn view_with(title: &str, tags: Vec<Tag>) -> NoteView {
        NoteView {
            id: Uuid::new_v4(),
            title: title.to_string(),
            markdown: String::new(),
            tags,
        }
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let view = view_with("Weekly Report", Vec::new());

        let matching = NoteListFilter {
            title: Some("report".to_string()),
            ..NoteListFilter::default()
        };
        let missing = NoteListFilter {
            title: Some("minutes".to_string()),
            ..NoteListFilter::default()
        };

        assert!(matches_filter(&view, &matching));
        assert!(!matches_filter(&view, &missing));
    }

    #[test]
    fn tag_filter_requires_every_selected_tag() {
        let view = view_with("n", vec![Tag::with_id("t1", "work")]);

        let single = NoteListFilter {
            tag_ids: vec!["t1".to_string()],
            ..NoteListFilter::default()
        };
        let both = NoteListFilter {
            tag_ids: vec!["t1".to_string(), "t2".to_string()],
            ..NoteListFilter::default()
        };

        assert!(matches_filter(&view, &single));
        assert!(!matches_filter(&view, &both));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let view = view_with("anything", Vec::new());
        assert!(matches_filter(&view, &NoteListFilter::default()));
    }
}
