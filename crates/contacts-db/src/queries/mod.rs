//! Database query modules.

pub mod contacts;
