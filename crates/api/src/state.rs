use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` and cloned per request; cloning is cheap (the pool
/// is reference counted and the config sits behind an `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: authvid_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
