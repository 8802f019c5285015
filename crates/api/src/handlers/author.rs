//! Handlers for the `/authors` resource and the author+videos workflow.

use authvid_core::types::DbId;
use authvid_db::models::author::{Author, AuthorWithVideos, NewAuthorWithVideos};
use authvid_db::repositories::{AuthorRepo, ScanStrategy};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /authors
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<Author>,
) -> AppResult<Json<Author>> {
    let author = AuthorRepo::create(&state.pool, input).await?;
    Ok(Json(author))
}

/// GET /authors/{author_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Author>> {
    let author = AuthorRepo::find_by_id(&state.pool, id)
        .await
        .map_err(|e| AppError::for_entity(e, "Author", id))?;
    Ok(Json(author))
}

/// PATCH /authors
///
/// The body carries the id; only fields present in the body are written.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<Author>,
) -> AppResult<Json<Author>> {
    let id = input.id;
    let author = AuthorRepo::patch(&state.pool, input)
        .await
        .map_err(|e| AppError::for_entity(e, "Author", id))?;
    Ok(Json(author))
}

/// DELETE /authors/{author_id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    AuthorRepo::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::for_entity(e, "Author", id))?;
    Ok(StatusCode::OK)
}

/// POST /authorWithVideos
pub async fn create_with_videos(
    State(state): State<AppState>,
    Json(input): Json<NewAuthorWithVideos>,
) -> AppResult<Json<AuthorWithVideos>> {
    let created = AuthorRepo::create_with_videos(&state.pool, input).await?;
    tracing::info!(
        author_id = created.author_id,
        video_count = created.videos.len(),
        "Created author with videos"
    );
    Ok(Json(created))
}

/// GET /authors/phone/test/chunks
pub async fn invalid_phones_chunked(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    let strategy = ScanStrategy::Chunked {
        chunk_size: state.config.scan_chunk_size,
    };
    scan_invalid_phones(&state, strategy).await
}

/// GET /authors/phone/test/nochunks
pub async fn invalid_phones_full(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    scan_invalid_phones(&state, ScanStrategy::FullLoad).await
}

async fn scan_invalid_phones(
    state: &AppState,
    strategy: ScanStrategy,
) -> AppResult<Json<Vec<Author>>> {
    tracing::info!(?strategy, "Starting invalid phone scan");
    let report = AuthorRepo::scan_invalid_phones(&state.pool, strategy).await?;
    tracing::info!(
        ?strategy,
        rows_scanned = report.rows_scanned,
        peak_rows_resident = report.peak_rows_resident,
        matched = report.authors.len(),
        "Finished invalid phone scan"
    );
    Ok(Json(report.authors))
}
