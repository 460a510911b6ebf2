use serde_derive::{Deserialize, Serialize};

use super::note::Note;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Title,
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query string of `GET /notes`. Everything stays a string so that junk
/// values fall back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortField,
    pub order: SortOrder,
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

impl ListParams {
    pub fn into_page_query(self, max_limit: Option<i64>) -> PageQuery {
        let page = positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let mut limit = positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);
        if let Some(max) = max_limit {
            limit = limit.min(max);
        }

        let sort_by = match self.sort_by.as_deref() {
            Some("title") => SortField::Title,
            Some("content") => SortField::Content,
            _ => SortField::CreatedAt,
        };

        let order = match self.order.as_deref() {
            Some(o) if o.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };

        PageQuery {
            page,
            limit,
            sort_by,
            order,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        ListParams::default().into_page_query(None)
    }
}

impl PageQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total_notes: i64) -> i64 {
        if total_notes <= 0 {
            0
        } else {
            (total_notes - 1) / self.limit + 1
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePage {
    pub page: i64,
    pub total_pages: i64,
    pub total_notes: i64,
    pub notes: Vec<Note>,
}
