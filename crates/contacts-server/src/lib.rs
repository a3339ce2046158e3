//! contacts-server: HTTP API for contact records and their photos.
//!
//! This crate ties the database and photo storage together into a running
//! server. It provides:
//!
//! - [`service::ContactService`], the synchronous contact operations
//! - [`photos::PhotoStore`], filesystem storage for uploaded photos
//! - An Axum router with request-id tracing, CORS, and an OpenAPI document
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod photos;
pub mod router;
pub mod routes;
pub mod service;

use std::net::SocketAddr;

use axum::Router;
use contacts_core::config::Config;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

/// Start the contacts server.
///
/// Initializes the database, builds the [`AppContext`], and serves HTTP
/// until a shutdown signal is received.
pub async fn start(config: Config) -> contacts_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db_path = &config.server.db_path;
    let existed = db_path.exists();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }
    let db_str = db_path.to_string_lossy();
    let db = contacts_db::pool::init_pool(&db_str)?;
    if existed {
        tracing::info!("Database opened (existing) at {db_str}");
    } else {
        tracing::info!("Database created (new) at {db_str}");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| contacts_core::Error::Internal(format!("Invalid server address: {e}")))?;

    tracing::info!(
        "Storing photos in {}",
        config.photos.storage_dir.display()
    );
    let ctx = AppContext::new(db, config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| contacts_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;
    tracing::info!("Starting server on {addr}");

    let cancel = CancellationToken::new();
    serve(listener, app, cancel).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Serve `app` on `listener` until a signal arrives or `cancel` fires.
pub async fn serve(
    listener: tokio::net::TcpListener,
    app: Router,
    cancel: CancellationToken,
) -> contacts_core::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM) or cancellation.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => {}
    }

    tracing::info!("Shutdown signal received");
}
