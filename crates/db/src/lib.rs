//! Persistence layer for authors and videos.
//!
//! - [`gateway`] holds the entity-agnostic insert/patch/delete/query and
//!   transaction primitives.
//! - [`models`] holds the row structs and request DTOs.
//! - [`repositories`] composes the gateway into per-table operations and the
//!   multi-step workflows.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod gateway;
pub mod models;
pub mod repositories;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
