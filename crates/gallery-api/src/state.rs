use std::path::PathBuf;
use std::sync::Arc;

use gallery_core::FsDecoder;
use gallery_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub decoder: FsDecoder,
    /// Served under `/static` and used to resolve relative picture paths.
    pub image_dir: PathBuf,
    /// Default size of the recent-pictures listing.
    pub recent_limit: u32,
}

impl AppStateInner {
    pub fn new(db: Database, image_dir: PathBuf, recent_limit: u32) -> AppState {
        Arc::new(Self {
            db,
            decoder: FsDecoder::new(&image_dir),
            image_dir,
            recent_limit,
        })
    }
}
