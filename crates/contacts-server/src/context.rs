//! Application context shared across route handlers.
//!
//! [`AppContext`] is handed to every handler via Axum state. Everything in it
//! sits behind `Arc`, so cloning is cheap.

use std::sync::Arc;
use std::time::SystemTime;

use contacts_core::config::Config;
use contacts_db::pool::DbPool;

use crate::photos::PhotoStore;
use crate::service::ContactService;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub contacts: Arc<ContactService>,
    /// When the context was built; reported by `/health`.
    pub started_at: SystemTime,
}

impl AppContext {
    /// Build a context whose photo store is rooted at
    /// `config.photos.storage_dir`.
    pub fn new(db: DbPool, config: Config) -> Self {
        let photos = PhotoStore::new(config.photos.storage_dir.clone());
        let contacts = Arc::new(ContactService::new(db, photos));
        Self {
            config: Arc::new(config),
            contacts,
            started_at: SystemTime::now(),
        }
    }
}
