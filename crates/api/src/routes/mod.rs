pub mod author;
pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /authors                          create (POST), patch (PATCH)
/// /authors/{author_id}              get (GET), delete (DELETE)
/// /authors/{author_id}/videos       create video for author (POST)
/// /authors/phone/test/chunks        invalid phones, chunked scan (GET)
/// /authors/phone/test/nochunks      invalid phones, full load (GET)
/// /authorWithVideos                 author + videos in one transaction (POST)
///
/// /videos                           patch (PATCH)
/// /videos/{video_id}                delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(author::router())
        .merge(video::router())
}
