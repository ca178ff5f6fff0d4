use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};

use crate::Database;
use crate::models::{NewPicture, PictureRow};
use crate::store::StoreError;

const PICTURE_COLUMNS: &str = "id, path, description, created_at, updated_at";

impl Database {
    // -- Pictures --

    pub fn insert_picture(&self, picture: &NewPicture<'_>) -> Result<i64, StoreError> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO pictures (id, path, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    picture.id,
                    picture.path,
                    picture.description,
                    format_timestamp(&picture.created_at),
                    format_timestamp(&picture.updated_at),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_picture(&self, id: i64) -> Result<Option<PictureRow>, StoreError> {
        self.with_conn(|conn| {
            query_one(
                conn,
                &format!("SELECT {PICTURE_COLUMNS} FROM pictures WHERE id = ?1 AND deleted_at IS NULL"),
                rusqlite::params![id],
            )
        })
    }

    pub fn get_picture_by_path(&self, path: &str) -> Result<Option<PictureRow>, StoreError> {
        self.with_conn(|conn| {
            query_one(
                conn,
                &format!(
                    "SELECT {PICTURE_COLUMNS} FROM pictures WHERE path = ?1 AND deleted_at IS NULL
                     ORDER BY id ASC LIMIT 1"
                ),
                rusqlite::params![path],
            )
        })
    }

    pub fn get_picture_ids(&self) -> Result<Vec<i64>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id FROM pictures WHERE deleted_at IS NULL ORDER BY id ASC")?;
            let ids = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<i64>, _>>()?;
            Ok(ids)
        })
    }

    pub fn get_recent_pictures(&self, limit: u32) -> Result<Vec<PictureRow>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PICTURE_COLUMNS} FROM pictures
                 WHERE deleted_at IS NULL
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1"
            ))?;
            let rows = stmt
                .query_map([limit], map_picture)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Marks a picture deleted. Returns false if no live row had that id.
    pub fn soft_delete_picture(&self, id: i64) -> Result<bool, StoreError> {
        let now = format_timestamp(&Utc::now());
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE pictures SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                rusqlite::params![now, id],
            )?;
            Ok(changed > 0)
        })
    }
}

fn query_one(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Option<PictureRow>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let row = stmt.query_row(params, map_picture).optional()?;
    Ok(row)
}

fn map_picture(row: &Row<'_>) -> rusqlite::Result<PictureRow> {
    Ok(PictureRow {
        id: row.get(0)?,
        path: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_timestamp(3, row.get(3)?)?,
        updated_at: parse_timestamp(4, row.get(4)?)?,
    })
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, StoreError>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, StoreError> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn new_picture(path: &str, created_at: DateTime<Utc>) -> NewPicture<'_> {
        NewPicture {
            id: None,
            path,
            description: "",
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();

        let first = db.insert_picture(&new_picture("a.jpg", now)).unwrap();
        let second = db.insert_picture(&new_picture("b.jpg", now)).unwrap();

        assert!(first > 0);
        assert!(second > first);
    }

    #[test]
    fn lookup_round_trips_row() {
        let db = Database::open_in_memory().unwrap();
        let created = Utc.timestamp_opt(1_700_000_000, 250).unwrap();
        let id = db
            .insert_picture(&NewPicture {
                id: None,
                path: "a.jpg",
                description: "x",
                created_at: created,
                updated_at: created,
            })
            .unwrap();

        let row = db.get_picture(id).unwrap().expect("row should exist");
        assert_eq!(row.path, "a.jpg");
        assert_eq!(row.description, "x");
        assert_eq!(row.created_at, created);

        let by_path = db.get_picture_by_path("a.jpg").unwrap().expect("row should exist");
        assert_eq!(by_path.id, id);
    }

    #[test]
    fn missing_rows_are_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_picture(999).unwrap().is_none());
        assert!(db.get_picture_by_path("nope.jpg").unwrap().is_none());
        assert!(db.get_picture_ids().unwrap().is_empty());
    }

    #[test]
    fn soft_deleted_rows_are_hidden() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap();

        assert!(db.soft_delete_picture(id).unwrap());
        assert!(!db.soft_delete_picture(id).unwrap());

        assert!(db.get_picture(id).unwrap().is_none());
        assert!(db.get_picture_by_path("a.jpg").unwrap().is_none());
        assert!(db.get_picture_ids().unwrap().is_empty());
        assert!(db.get_recent_pictures(10).unwrap().is_empty());
    }

    #[test]
    fn duplicate_live_path_is_a_conflict() {
        let db = Database::open_in_memory().unwrap();
        db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap();

        let err = db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap_err();
        assert!(matches!(err, StoreError::Conflict), "got {err:?}");
    }

    #[test]
    fn reused_primary_key_is_not_a_path_conflict() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap();

        let err = db
            .insert_picture(&NewPicture {
                id: Some(id),
                ..new_picture("b.jpg", Utc::now())
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)), "got {err:?}");
    }

    #[test]
    fn path_is_reusable_after_soft_delete() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap();
        db.soft_delete_picture(id).unwrap();

        let again = db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap();
        assert_ne!(again, id);
    }

    #[test]
    fn recent_is_newest_first_and_capped() {
        let db = Database::open_in_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        // Inserted out of order on purpose
        for (path, offset) in [("b.jpg", 2), ("d.jpg", 4), ("a.jpg", 1), ("c.jpg", 3)] {
            db.insert_picture(&new_picture(path, base + Duration::minutes(offset)))
                .unwrap();
        }

        let paths: Vec<String> = db
            .get_recent_pictures(3)
            .unwrap()
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, ["d.jpg", "c.jpg", "b.jpg"]);
    }

    #[test]
    fn ids_come_back_ascending() {
        let db = Database::open_in_memory().unwrap();
        let ids: Vec<i64> = ["a.jpg", "b.jpg", "c.jpg"]
            .iter()
            .map(|p| db.insert_picture(&new_picture(p, Utc::now())).unwrap())
            .collect();

        assert_eq!(db.get_picture_ids().unwrap(), ids);
    }

    #[test]
    fn file_backed_database_reads_through_pool() {
        let path = std::env::temp_dir().join(format!(
            "gallery_db_test_{}_{}.db",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));

        {
            let db = Database::open(&path).unwrap();
            let id = db.insert_picture(&new_picture("a.jpg", Utc::now())).unwrap();

            // Round-robin through every reader at least once
            for _ in 0..8 {
                assert_eq!(db.get_picture(id).unwrap().map(|r| r.id), Some(id));
            }
        }

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
