use rusqlite::ErrorCode;
use rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE;
use thiserror::Error;

use crate::Database;
use crate::models::{NewPicture, PictureRow};

/// Failures from the storage layer. A missing row is not an error: lookups
/// return `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another live row already holds the same unique value.
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Sqlite(rusqlite::Error),
    #[error("DB lock poisoned: {0}")]
    Poisoned(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == ErrorCode::ConstraintViolation
                    && e.extended_code == SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::Conflict
            }
            _ => StoreError::Sqlite(err),
        }
    }
}

/// Table-scoped access to live (not soft-deleted) pictures.
pub trait PictureStore: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<PictureRow>, StoreError>;

    fn find_by_path(&self, path: &str) -> Result<Option<PictureRow>, StoreError>;

    /// Every live id, ascending.
    fn list_ids(&self) -> Result<Vec<i64>, StoreError>;

    /// Newest first, at most `limit` rows.
    fn recent(&self, limit: u32) -> Result<Vec<PictureRow>, StoreError>;

    /// Returns the id assigned by storage.
    fn insert(&self, picture: &NewPicture<'_>) -> Result<i64, StoreError>;
}

impl PictureStore for Database {
    fn find_by_id(&self, id: i64) -> Result<Option<PictureRow>, StoreError> {
        self.get_picture(id)
    }

    fn find_by_path(&self, path: &str) -> Result<Option<PictureRow>, StoreError> {
        self.get_picture_by_path(path)
    }

    fn list_ids(&self) -> Result<Vec<i64>, StoreError> {
        self.get_picture_ids()
    }

    fn recent(&self, limit: u32) -> Result<Vec<PictureRow>, StoreError> {
        self.get_recent_pictures(limit)
    }

    fn insert(&self, picture: &NewPicture<'_>) -> Result<i64, StoreError> {
        self.insert_picture(picture)
    }
}
