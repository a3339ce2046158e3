//! Route handlers for the HTTP API.

pub mod contacts;
pub mod health;
pub mod photos;
