//! Handlers for the `/videos` resource.

use authvid_core::types::DbId;
use authvid_db::models::video::Video;
use authvid_db::repositories::VideoRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /authors/{author_id}/videos
///
/// The author id from the path overrides any `author_id` in the body.
pub async fn create(
    State(state): State<AppState>,
    Path(author_id): Path<DbId>,
    Json(mut input): Json<Video>,
) -> AppResult<Json<Video>> {
    input.author_id = Some(author_id);
    let video = VideoRepo::create(&state.pool, input).await?;
    Ok(Json(video))
}

/// PATCH /videos
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<Video>,
) -> AppResult<Json<Video>> {
    let id = input.id;
    let video = VideoRepo::patch(&state.pool, input)
        .await
        .map_err(|e| AppError::for_entity(e, "Video", id))?;
    Ok(Json(video))
}

/// DELETE /videos/{video_id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    VideoRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::for_entity(e, "Video", id))?;
    Ok(StatusCode::OK)
}
