//! In-memory `PictureStore` double that can be told to fail.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use gallery_db::{NewPicture, PictureRow, PictureStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Reads,
    Insert,
    InsertConflict,
    /// Insert "succeeds" without assigning an id.
    AssignNoId,
    /// `find_by_id` misses even though `list_ids` lists the row.
    Refetch,
}

#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<PictureRow>>,
    fail: Option<FailOn>,
    inserts: AtomicUsize,
}

fn io_error() -> StoreError {
    StoreError::Sqlite(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("disk I/O error".into()),
    ))
}

impl FakeStore {
    pub fn failing(fail: FailOn) -> Self {
        Self {
            fail: Some(fail),
            ..Default::default()
        }
    }

    pub fn seed(&self, path: &str) -> i64 {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(PictureRow {
            id,
            path: path.into(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        match self.fail {
            Some(FailOn::Reads) => Err(io_error()),
            _ => Ok(()),
        }
    }
}

impl PictureStore for FakeStore {
    fn find_by_id(&self, id: i64) -> Result<Option<PictureRow>, StoreError> {
        self.check_reads()?;
        if self.fail == Some(FailOn::Refetch) {
            return Ok(None);
        }
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    fn find_by_path(&self, path: &str) -> Result<Option<PictureRow>, StoreError> {
        self.check_reads()?;
        Ok(self.rows.lock().unwrap().iter().find(|r| r.path == path).cloned())
    }

    fn list_ids(&self) -> Result<Vec<i64>, StoreError> {
        self.check_reads()?;
        Ok(self.rows.lock().unwrap().iter().map(|r| r.id).collect())
    }

    fn recent(&self, limit: u32) -> Result<Vec<PictureRow>, StoreError> {
        self.check_reads()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    fn insert(&self, picture: &NewPicture<'_>) -> Result<i64, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        match self.fail {
            Some(FailOn::Insert) => return Err(io_error()),
            Some(FailOn::InsertConflict) => return Err(StoreError::Conflict),
            Some(FailOn::AssignNoId) => return Ok(0),
            _ => {}
        }

        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(PictureRow {
            id,
            path: picture.path.into(),
            description: picture.description.into(),
            created_at: picture.created_at,
            updated_at: picture.updated_at,
        });
        Ok(id)
    }
}
