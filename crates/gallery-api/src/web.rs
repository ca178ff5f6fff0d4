//! Browser-facing routes: the random image itself, listings and details.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use gallery_types::{Message, RecentQuery};

use crate::state::AppState;

const MAX_RECENT: u32 = 200;

/// GET /pic/random: a random picture re-encoded as JPEG.
pub async fn random_image(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let db = state.clone();
    let encoded = tokio::task::spawn_blocking(move || {
        gallery_core::random_picture(&db.db, &db.decoder).map(|img| gallery_core::encode_jpeg(&img))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let bytes = match encoded {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => {
            error!("Failed to encode random picture: {:#}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        None => {
            warn!("No random picture returned");
            return Err(StatusCode::NOT_FOUND);
        }
    };

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// GET /pic/recent (also `/pic` and `/`): most recently added pictures.
pub async fn recent_pictures(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let limit = query.limit.unwrap_or(state.recent_limit).min(MAX_RECENT);

    let db = state.clone();
    let pictures = tokio::task::spawn_blocking(move || gallery_core::recent_pictures(limit, &db.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(pictures))
}

/// GET /pic/detail/{pic_id}
pub async fn picture_detail(
    State(state): State<AppState>,
    Path(pic_id): Path<String>,
) -> Result<Response, StatusCode> {
    let Ok(id) = pic_id.parse::<i64>() else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(Message::new(false, "Could not parse ID from request")),
        )
            .into_response());
    };

    let db = state.clone();
    let picture = tokio::task::spawn_blocking(move || gallery_core::picture_by_id(id, &db.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match picture {
        Some(picture) => Ok(Json(picture).into_response()),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
