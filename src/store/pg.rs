use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::ConnectionManager;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::{
        note::{Note, NoteChanges, NoteId},
        page::{NotePage, PageQuery, SortField, SortOrder},
    },
    schema::notes,
};

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, ServerError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;

        Ok(PgNoteStore { pool })
    }

    pub fn run_migrations(&self) -> Result<(), ServerError> {
        let mut connection = self.pool.get()?;
        let applied = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| ServerError::DieselError(e.to_string()))?;

        for version in applied {
            log::info!("applied migration {}", version);
        }

        Ok(())
    }
}

impl NoteStore for PgNoteStore {
    fn create(&self, changes: NoteChanges) -> Result<Note, ServerError> {
        let mut connection = self.pool.get()?;

        let note = diesel::insert_into(notes::table)
            .values(&Note::new(changes))
            .get_result::<Note>(&mut connection)?;

        Ok(note)
    }

    fn list_page(&self, query: &PageQuery) -> Result<NotePage, ServerError> {
        let mut connection = self.pool.get()?;

        let total_notes = notes::table.count().get_result::<i64>(&mut connection)?;

        let sorted = notes::table.into_boxed::<Pg>();
        let sorted = match (query.sort_by, query.order) {
            (SortField::CreatedAt, SortOrder::Asc) => sorted.order(notes::created_at.asc()),
            (SortField::CreatedAt, SortOrder::Desc) => sorted.order(notes::created_at.desc()),
            (SortField::Title, SortOrder::Asc) => sorted.order(notes::title.asc()),
            (SortField::Title, SortOrder::Desc) => sorted.order(notes::title.desc()),
            (SortField::Content, SortOrder::Asc) => sorted.order(notes::content.asc()),
            (SortField::Content, SortOrder::Desc) => sorted.order(notes::content.desc()),
        };

        let page = sorted
            .offset(query.offset())
            .limit(query.limit)
            .load::<Note>(&mut connection)?;

        Ok(NotePage {
            page: query.page,
            total_pages: query.total_pages(total_notes),
            total_notes,
            notes: page,
        })
    }

    fn list_all(&self) -> Result<Vec<Note>, ServerError> {
        let mut connection = self.pool.get()?;

        Ok(notes::table.load::<Note>(&mut connection)?)
    }

    fn get(&self, id: &NoteId) -> Result<Note, ServerError> {
        let mut connection = self.pool.get()?;

        Ok(notes::table
            .find(id.as_str())
            .first::<Note>(&mut connection)?)
    }

    fn update(&self, id: &NoteId, changes: NoteChanges) -> Result<Note, ServerError> {
        let mut connection = self.pool.get()?;

        Ok(diesel::update(notes::table.find(id.as_str()))
            .set(&changes)
            .get_result::<Note>(&mut connection)?)
    }

    fn delete(&self, id: &NoteId) -> Result<(), ServerError> {
        let mut connection = self.pool.get()?;

        match diesel::delete(notes::table.find(id.as_str())).execute(&mut connection)? {
            0 => Err(ServerError::NotFound),
            _ => Ok(()),
        }
    }
}
