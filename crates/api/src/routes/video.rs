//! Route definitions for the `/videos` resource.

use axum::routing::{delete, patch};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// ```text
/// PATCH  /videos              -> update
/// DELETE /videos/{video_id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos", patch(video::update))
        .route("/videos/{video_id}", delete(video::delete))
}
