use crate::{
    errors::ServerError,
    models::{
        note::{Note, NoteChanges, NoteId},
        page::{NotePage, PageQuery},
    },
};

#[cfg(test)]
pub mod memory;
pub mod pg;

/// Persistence for notes. Implementations are blocking; handlers call them
/// through `web::block`.
pub trait NoteStore: Send + Sync {
    fn create(&self, changes: NoteChanges) -> Result<Note, ServerError>;

    fn list_page(&self, query: &PageQuery) -> Result<NotePage, ServerError>;

    /// Every note, in whatever order the backend yields them.
    fn list_all(&self) -> Result<Vec<Note>, ServerError>;

    /// `ServerError::NotFound` when no note carries `id`.
    fn get(&self, id: &NoteId) -> Result<Note, ServerError>;

    /// Replaces title and content; `id` and `created_at` are kept.
    fn update(&self, id: &NoteId, changes: NoteChanges) -> Result<Note, ServerError>;

    fn delete(&self, id: &NoteId) -> Result<(), ServerError>;
}
