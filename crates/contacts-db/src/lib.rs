//! contacts-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, the contact model, and the contact repository
//! queries (lookup, paged listing, upsert, delete).

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
