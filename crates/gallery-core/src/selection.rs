use std::path::Path;

use image::DynamicImage;
use rand::Rng;
use tracing::{debug, warn};

use gallery_db::{PictureRow, PictureStore};
use gallery_types::Picture;

use crate::decoder::ImageDecoder;

/// Picks one live picture uniformly at random.
///
/// Two round-trips: the first lists every live id, the second re-fetches the
/// chosen row, so a row deleted in between yields `None`.
fn pick_random<S, R>(store: &S, rng: &mut R) -> Option<PictureRow>
where
    S: PictureStore + ?Sized,
    R: Rng,
{
    let ids = match store.list_ids() {
        Ok(ids) => ids,
        Err(e) => {
            warn!("Failed to get picture ids from database: {}", e);
            return None;
        }
    };

    if ids.is_empty() {
        debug!("No pictures stored yet");
        return None;
    }

    let chosen = ids[rng.random_range(0..ids.len())];
    match store.find_by_id(chosen) {
        Ok(Some(row)) => Some(row),
        Ok(None) => {
            warn!("Picture {} disappeared before it could be fetched", chosen);
            None
        }
        Err(e) => {
            warn!("Failed to get picture {}: {}", chosen, e);
            None
        }
    }
}

/// Decoded pixels of a random picture, or `None` if there is nothing to
/// show or the file cannot be read.
pub fn random_picture<S, D>(store: &S, decoder: &D) -> Option<DynamicImage>
where
    S: PictureStore + ?Sized,
    D: ImageDecoder + ?Sized,
{
    random_picture_with(store, decoder, &mut rand::rng())
}

/// Metadata of a random picture; the file itself is never touched.
pub fn random_picture_info<S: PictureStore + ?Sized>(store: &S) -> Option<Picture> {
    random_picture_info_with(store, &mut rand::rng())
}

fn random_picture_with<S, D, R>(store: &S, decoder: &D, rng: &mut R) -> Option<DynamicImage>
where
    S: PictureStore + ?Sized,
    D: ImageDecoder + ?Sized,
    R: Rng,
{
    let row = pick_random(store, rng)?;
    let path = Path::new(&row.path);

    let bytes = match decoder.open(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not open picture {}: {:#}", row.path, e);
            return None;
        }
    };

    match decoder.decode(&bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("Could not decode picture {}: {:#}", row.path, e);
            None
        }
    }
}

fn random_picture_info_with<S, R>(store: &S, rng: &mut R) -> Option<Picture>
where
    S: PictureStore + ?Sized,
    R: Rng,
{
    pick_random(store, rng).map(Picture::from)
}
