//! Picture repository: the checks that run before a picture is written,
//! the single write path, and the read queries the gallery serves.
//!
//! Every operation takes the storage handle explicitly so callers can share
//! one pooled database or substitute their own [`PictureStore`].

pub mod decoder;
pub mod pictures;
pub mod selection;

#[cfg(test)]
mod testing;

pub use decoder::{FsDecoder, ImageDecoder, encode_jpeg};
pub use gallery_db::PictureStore;
pub use pictures::{create, picture_by_id, recent_pictures, validate};
pub use selection::{random_picture, random_picture_info};
