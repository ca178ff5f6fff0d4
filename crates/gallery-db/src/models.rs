//! Database row types. These map directly to SQLite rows and are kept
//! apart from the gallery-types models so the storage layer stays independent.

use chrono::{DateTime, Utc};
use gallery_types::Picture;

#[derive(Debug, Clone)]
pub struct PictureRow {
    pub id: i64,
    pub path: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewPicture<'a> {
    /// `None` lets storage assign the id.
    pub id: Option<i64>,
    pub path: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PictureRow> for Picture {
    fn from(row: PictureRow) -> Self {
        Picture {
            id: row.id,
            path: row.path,
            description: row.description,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
