pub mod pictures;
pub mod state;
pub mod web;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

pub use state::{AppState, AppStateInner};

/// Every gallery route. Layers (tracing, CORS) are added by the binary.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.image_dir);

    Router::new()
        .route("/api/pic/create", post(pictures::create_picture))
        .route("/api/pic/random", get(pictures::random_picture_info))
        .route("/pic/random", get(web::random_image))
        .route("/pic/recent", get(web::recent_pictures))
        .route("/pic/detail/{pic_id}", get(web::picture_detail))
        .route("/pic", get(web::recent_pictures))
        .route("/", get(web::recent_pictures))
        .route("/health", get(web::health))
        .nest_service("/static", static_files)
        .with_state(state)
}
