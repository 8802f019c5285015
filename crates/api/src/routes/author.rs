//! Route definitions for the `/authors` resource.
//!
//! Video creation is nested under `/authors/{author_id}/videos` because the
//! owning author comes from the path.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{author, video};
use crate::state::AppState;

/// Routes for authors.
///
/// ```text
/// POST   /authors                       -> create
/// PATCH  /authors                       -> update
/// GET    /authors/{author_id}           -> get_by_id
/// DELETE /authors/{author_id}           -> delete
/// POST   /authors/{author_id}/videos    -> video::create
/// GET    /authors/phone/test/chunks     -> invalid_phones_chunked
/// GET    /authors/phone/test/nochunks   -> invalid_phones_full
/// POST   /authorWithVideos              -> create_with_videos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", post(author::create).patch(author::update))
        .route(
            "/authors/{author_id}",
            get(author::get_by_id).delete(author::delete),
        )
        .route("/authors/{author_id}/videos", post(video::create))
        .route(
            "/authors/phone/test/chunks",
            get(author::invalid_phones_chunked),
        )
        .route(
            "/authors/phone/test/nochunks",
            get(author::invalid_phones_full),
        )
        .route("/authorWithVideos", post(author::create_with_videos))
}
