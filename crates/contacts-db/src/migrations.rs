//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use contacts_core::{Error, Result};
use rusqlite::Connection;

/// V1: the contacts table.
const V1_INITIAL: &str = r#"
CREATE TABLE contacts (
    id        TEXT PRIMARY KEY,
    name      TEXT,
    email     TEXT,
    title     TEXT,
    phone     TEXT,
    address   TEXT,
    status    TEXT,
    photo_url TEXT
);
"#;

/// V2: listings sort by name.
const V2_NAME_INDEX: &str = r#"
CREATE INDEX idx_contacts_name ON contacts(name);
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL), (2, V2_NAME_INDEX)];

/// Apply any migrations that have not yet been recorded.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::database(format!("Failed to create schema_migrations: {e}")))?;

    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(Error::database)?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(Error::database)?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(Error::database)?;

        tx.commit().map_err(Error::database)?;

        tracing::debug!("Applied migration V{version}");
    }

    Ok(())
}
