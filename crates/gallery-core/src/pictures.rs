use chrono::Utc;
use tracing::{error, info, warn};

use gallery_db::{NewPicture, PictureStore, StoreError};
use gallery_types::{Message, Picture, Validation};

pub const MISSING_PATH: &str = "Pic entity does not have a valid Path attribute!";
pub const ID_LOOKUP_FAILED: &str = "Connection error. Failed to validate picture ID.";
pub const VALIDATION_PASSED: &str = "Validation passed";
pub const INSERT_NO_ID: &str = "Failed to insert picture data into database.";
pub const INSERTED: &str = "New picture inserted";

fn duplicate_path(path: &str) -> String {
    format!("Picture path already stored in database: {}", path)
}

/// Checks a picture before it is written.
///
/// A blank path is always rejected. A positive id must refer to a live row
/// (its stored path is not compared). Without an id the path must not be
/// held by any live row.
pub fn validate<S: PictureStore + ?Sized>(picture: &Picture, store: &S) -> Validation {
    if picture.path.trim().is_empty() {
        return Validation::reject(MISSING_PATH);
    }

    if picture.id > 0 {
        return match store.find_by_id(picture.id) {
            Ok(Some(_)) => Validation::accept(VALIDATION_PASSED),
            Ok(None) => {
                Validation::reject(format!("Picture not found in Database: {}", picture.id))
            }
            Err(e) => {
                error!("Failed to look up picture {}: {}", picture.id, e);
                Validation::reject(ID_LOOKUP_FAILED)
            }
        };
    }

    match store.find_by_path(&picture.path) {
        Ok(None) => Validation::accept(VALIDATION_PASSED),
        Ok(Some(_)) => Validation::reject(duplicate_path(&picture.path)),
        Err(e) => Validation::reject(format!(
            "Unexpected error while validating picture path in database: {} - Error: {}",
            picture.path, e
        )),
    }
}

/// Validates and inserts a picture, stamping `created_at` if the caller left
/// it unset. `updated_at` is always the insert time. On success the envelope
/// carries the picture exactly as storage now holds it.
pub fn create<S: PictureStore + ?Sized>(mut picture: Picture, store: &S) -> Message {
    let validation = validate(&picture, store);
    if !validation.is_accepted() {
        return validation.message;
    }

    let now = Utc::now();
    let created_at = *picture.created_at.get_or_insert(now);
    picture.updated_at = Some(now);

    let inserted = store.insert(&NewPicture {
        id: picture.is_persisted().then_some(picture.id),
        path: &picture.path,
        description: &picture.description,
        created_at,
        updated_at: now,
    });

    match inserted {
        // Another writer took the path between validation and insert
        Err(StoreError::Conflict) => {
            warn!("Lost race inserting {}", picture.path);
            Message::new(false, duplicate_path(&picture.path))
        }
        Err(e) => Message::new(false, format!("Error inserting into database: {}", e)),
        Ok(id) if id < 1 => {
            error!("Insert of {} reported no id", picture.path);
            Message::new(false, INSERT_NO_ID)
        }
        Ok(id) => {
            picture.id = id;
            info!("Stored picture {} at {}", id, picture.path);
            Message::with_picture(true, INSERTED, picture)
        }
    }
}

/// Live pictures newest first, at most `n`. Storage failures read as "no pictures".
pub fn recent_pictures<S: PictureStore + ?Sized>(n: u32, store: &S) -> Vec<Picture> {
    match store.recent(n) {
        Ok(rows) => rows.into_iter().map(Picture::from).collect(),
        Err(e) => {
            error!("Failed to get recent pictures: {}", e);
            Vec::new()
        }
    }
}

/// A missing row and a storage failure both come back as `None`.
pub fn picture_by_id<S: PictureStore + ?Sized>(id: i64, store: &S) -> Option<Picture> {
    match store.find_by_id(id) {
        Ok(row) => row.map(Picture::from),
        Err(e) => {
            error!("Failed to get picture {}: {}", id, e);
            None
        }
    }
}
