//! JSON API under `/api/pic`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, warn};

use gallery_types::{Message, Picture};

use crate::state::AppState;

const INVALID_REQUEST: &str = "Invalid request";

/// POST /api/pic/create: validates the submitted picture, then stores it.
pub async fn create_picture(
    State(state): State<AppState>,
    payload: Result<Json<Picture>, JsonRejection>,
) -> Result<impl IntoResponse, StatusCode> {
    let Json(picture) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Unreadable picture payload: {}", e);
            return Ok((StatusCode::BAD_REQUEST, Json(Message::new(false, INVALID_REQUEST))));
        }
    };

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let response = tokio::task::spawn_blocking(move || {
        let validation = gallery_core::validate(&picture, &db.db);
        if !validation.is_accepted() {
            warn!("Error validating new picture data: {}", validation.message.message);
            return None;
        }
        Some(gallery_core::create(picture, &db.db))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(match response {
        None => (StatusCode::BAD_REQUEST, Json(Message::new(false, INVALID_REQUEST))),
        Some(msg) if msg.status => (StatusCode::CREATED, Json(msg)),
        Some(msg) => (StatusCode::OK, Json(msg)),
    })
}

/// GET /api/pic/random: metadata of one random picture.
pub async fn random_picture_info(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let picture = tokio::task::spawn_blocking(move || gallery_core::random_picture_info(&db.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(match picture {
        Some(picture) => Message::with_picture(true, "success", picture),
        None => Message::new(false, "No pictures available"),
    }))
}
