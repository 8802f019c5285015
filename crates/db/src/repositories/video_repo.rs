//! Repository for the `videos` table.

use authvid_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::gateway;
use crate::models::video::{Video, VIDEOS};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, like_count, view_count, author_id";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning it with its assigned id.
    pub async fn create(pool: &PgPool, mut video: Video) -> Result<Video, DbError> {
        gateway::insert(pool, &VIDEOS, &mut video).await?;
        Ok(video)
    }

    /// Find a video by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Video, DbError> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        gateway::query_one(pool, sqlx::query_as(&query).bind(id)).await
    }

    /// List the videos of one author in insertion order.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Video>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE author_id = $1 ORDER BY id");
        gateway::query_all(pool, sqlx::query_as(&query).bind(author_id)).await
    }

    /// Update the supplied fields of a video, returning the stored row.
    pub async fn patch(pool: &PgPool, mut video: Video) -> Result<Video, DbError> {
        gateway::patch(pool, &VIDEOS, &mut video).await?;
        Ok(video)
    }

    /// Permanently delete a video by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), DbError> {
        gateway::delete(pool, &VIDEOS, id).await
    }
}
