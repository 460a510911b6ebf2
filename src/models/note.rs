use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable};
use nanoid::nanoid;
use serde_derive::{Deserialize, Serialize};

use crate::{errors::ServerError, schema::notes};

#[derive(Clone, Debug, PartialEq, Queryable, Insertable, Serialize)]
#[diesel(table_name = notes)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Fresh note with a generated id, stamped with the current time.
    pub fn new(changes: NoteChanges) -> Self {
        Note {
            id: NoteId::generate().into_string(),
            title: changes.title,
            content: changes.content,
            created_at: Utc::now(),
        }
    }
}

/// Identifier of a stored note, as produced by `nanoid!()`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    pub const LENGTH: usize = 21;

    pub fn generate() -> Self {
        NoteId(nanoid!())
    }

    /// Returns `None` for anything the store could never have assigned.
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == Self::LENGTH
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        well_formed.then(|| NoteId(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, AsChangeset)]
#[diesel(table_name = notes)]
pub struct NoteChanges {
    pub title: String,
    pub content: String,
}

/// Raw create/update body, before it has been checked.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NotePayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

struct FieldRule {
    name: &'static str,
    min: usize,
    max: usize,
}

const TITLE: FieldRule = FieldRule {
    name: "title",
    min: 2,
    max: 100,
};

const CONTENT: FieldRule = FieldRule {
    name: "content",
    min: 2,
    max: 1000,
};

impl FieldRule {
    fn check(&self, value: Option<String>) -> Result<String, ServerError> {
        let value = match value {
            Some(v) => v,
            None => return Err(self.reject("is required".to_string())),
        };

        let len = value.chars().count();
        if len == 0 {
            Err(self.reject("is not allowed to be empty".to_string()))
        } else if len < self.min {
            Err(self.reject(format!(
                "length must be at least {} characters long",
                self.min
            )))
        } else if len > self.max {
            Err(self.reject(format!(
                "length must be less than or equal to {} characters long",
                self.max
            )))
        } else {
            Ok(value)
        }
    }

    fn reject(&self, reason: String) -> ServerError {
        ServerError::Validation(format!("\"{}\" {}", self.name, reason))
    }
}

impl NotePayload {
    /// Reports only the first violated constraint, title before content.
    pub fn validate(self) -> Result<NoteChanges, ServerError> {
        let title = TITLE.check(self.title)?;
        let content = CONTENT.check(self.content)?;

        Ok(NoteChanges { title, content })
    }
}
