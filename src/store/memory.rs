//! In-process stores used by the handler tests.

use std::cmp::Ordering;
use std::sync::Mutex;

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::{
        note::{Note, NoteChanges, NoteId},
        page::{NotePage, PageQuery, SortField, SortOrder},
    },
};

/// Keeps notes in insertion order, which stands in for the database's
/// natural order when sort keys tie.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn len(&self) -> usize {
        self.notes.lock().unwrap().len()
    }
}

fn compare(field: SortField, a: &Note, b: &Note) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Content => a.content.cmp(&b.content),
    }
}

impl NoteStore for MemoryNoteStore {
    fn create(&self, changes: NoteChanges) -> Result<Note, ServerError> {
        let note = Note::new(changes);
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    fn list_page(&self, query: &PageQuery) -> Result<NotePage, ServerError> {
        let mut all = self.list_all()?;
        all.sort_by(|a, b| match query.order {
            SortOrder::Asc => compare(query.sort_by, a, b),
            SortOrder::Desc => compare(query.sort_by, b, a),
        });

        let total_notes = all.len() as i64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(NotePage {
            page: query.page,
            total_pages: query.total_pages(total_notes),
            total_notes,
            notes: all.into_iter().skip(offset).take(limit).collect(),
        })
    }

    fn list_all(&self) -> Result<Vec<Note>, ServerError> {
        Ok(self.notes.lock().unwrap().clone())
    }

    fn get(&self, id: &NoteId) -> Result<Note, ServerError> {
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id.as_str())
            .cloned()
            .ok_or(ServerError::NotFound)
    }

    fn update(&self, id: &NoteId, changes: NoteChanges) -> Result<Note, ServerError> {
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .iter_mut()
            .find(|n| n.id == id.as_str())
            .ok_or(ServerError::NotFound)?;

        note.title = changes.title;
        note.content = changes.content;
        Ok(note.clone())
    }

    fn delete(&self, id: &NoteId) -> Result<(), ServerError> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| n.id != id.as_str());

        if notes.len() == before {
            Err(ServerError::NotFound)
        } else {
            Ok(())
        }
    }
}

/// Fails every call the way an unreachable database would.
pub struct UnavailableNoteStore;

impl UnavailableNoteStore {
    fn fail<T>() -> Result<T, ServerError> {
        Err(ServerError::R2D2Error("timed out waiting for connection".to_string()))
    }
}

impl NoteStore for UnavailableNoteStore {
    fn create(&self, _: NoteChanges) -> Result<Note, ServerError> {
        Self::fail()
    }

    fn list_page(&self, _: &PageQuery) -> Result<NotePage, ServerError> {
        Self::fail()
    }

    fn list_all(&self) -> Result<Vec<Note>, ServerError> {
        Self::fail()
    }

    fn get(&self, _: &NoteId) -> Result<Note, ServerError> {
        Self::fail()
    }

    fn update(&self, _: &NoteId, _: NoteChanges) -> Result<Note, ServerError> {
        Self::fail()
    }

    fn delete(&self, _: &NoteId) -> Result<(), ServerError> {
        Self::fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::ListParams;

    fn changes(title: &str) -> NoteChanges {
        NoteChanges {
            title: title.to_string(),
            content: format!("{} content", title),
        }
    }

    #[test]
    fn pages_sorted_by_title() {
        let store = MemoryNoteStore::default();
        for t in ["delta", "alpha", "charlie", "bravo"] {
            store.create(changes(t)).unwrap();
        }

        let query = ListParams {
            page: Some("2".into()),
            limit: Some("3".into()),
            sort_by: Some("title".into()),
            order: Some("asc".into()),
        }
        .into_page_query(None);
        let page = store.list_page(&query).unwrap();

        assert_eq!(page.total_notes, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.notes.len(), 1);
        assert_eq!(page.notes[0].title, "delta");
    }

    #[test]
    fn update_keeps_identity() {
        let store = MemoryNoteStore::default();
        let note = store.create(changes("before")).unwrap();
        let id = NoteId::parse(&note.id).unwrap();

        let updated = store.update(&id, changes("after")).unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.title, "after");
    }

    #[test]
    fn delete_reports_missing() {
        let store = MemoryNoteStore::default();
        let note = store.create(changes("gone")).unwrap();
        let id = NoteId::parse(&note.id).unwrap();

        assert!(store.delete(&id).is_ok());
        assert!(matches!(store.delete(&id), Err(ServerError::NotFound)));
        assert!(matches!(store.get(&id), Err(ServerError::NotFound)));
        assert_eq!(store.len(), 0);
    }
}
