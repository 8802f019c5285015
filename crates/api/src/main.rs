//! `authvid-api` binary: load configuration, connect to Postgres, serve until
//! SIGINT/SIGTERM, then drain the pool.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use authvid_api::config::{DatabaseConfig, ServerConfig};
use authvid_api::router::build_app_router;
use authvid_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "authvid_api=debug,authvid_db=debug,tower_http=debug";

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid HOST address: {0}")]
    Host(#[from] AddrParseError),

    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let db_config = DatabaseConfig::from_env();

    let pool = authvid_db::create_pool(&db_config.url, db_config.max_connections).await?;
    authvid_db::health_check(&pool).await?;
    tracing::info!(
        max_connections = db_config.max_connections,
        "Connected to database"
    );

    let addr = SocketAddr::new(config.host.parse::<IpAddr>()?, config.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        scan_chunk_size = config.scan_chunk_size,
        request_timeout_secs = config.request_timeout_secs,
        "Listening"
    );

    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let app = build_app_router(AppState {
        pool: pool.clone(),
        config: Arc::new(config),
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Listener closed, draining database pool");
    if tokio::time::timeout(drain_timeout, pool.close())
        .await
        .is_err()
    {
        tracing::warn!(
            timeout_secs = drain_timeout.as_secs(),
            "Timed out closing database pool"
        );
    }
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve on SIGINT, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => tracing::info!("SIGINT received, shutting down"),
                    _ = sigterm.recv() => tracing::info!("SIGTERM received, shutting down"),
                }
                return;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable, waiting for SIGINT only");
            }
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("SIGINT received, shutting down"),
        Err(err) => {
            tracing::error!(error = %err, "SIGINT handler unavailable, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
