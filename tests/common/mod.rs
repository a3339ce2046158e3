//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, a temporary photo
//! directory, and a full [`AppContext`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use contacts_core::config::Config;
use contacts_db::pool::{init_memory_pool, DbPool};
use contacts_server::context::AppContext;
use contacts_server::router::build_router;
use tempfile::TempDir;

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    /// Holds the photo directory alive for the duration of the test.
    pub photo_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration and in-memory DB.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration and in-memory DB.
    /// The photo directory is always replaced by a fresh temp dir.
    pub fn with_config(mut config: Config) -> Self {
        let photo_dir = tempfile::tempdir().expect("failed to create photo dir");
        config.photos.storage_dir = photo_dir.path().join("uploads");

        let db = init_memory_pool().expect("failed to create in-memory pool");
        let ctx = AppContext::new(db.clone(), config);

        Self { ctx, db, photo_dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> contacts_db::pool::PooledConnection {
        contacts_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    /// Directory the server writes photos into.
    pub fn photos_path(&self) -> std::path::PathBuf {
        self.photo_dir.path().join("uploads")
    }

    /// Create a contact over HTTP and return its JSON body.
    pub async fn create_contact(&self, addr: SocketAddr, body: serde_json::Value) -> serde_json::Value {
        let resp = reqwest::Client::new()
            .post(format!("http://{addr}/contacts"))
            .json(&body)
            .send()
            .await
            .expect("create request failed");
        assert_eq!(resp.status(), 201);
        resp.json().await.expect("invalid create body")
    }
}
