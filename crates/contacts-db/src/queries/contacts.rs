//! Contact repository: lookup, paged listing, upsert, and delete.
//!
//! Every function takes a plain `&Connection`, so callers can pass either a
//! pooled connection or an open `Transaction`.

use contacts_core::{ContactId, Error, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::models::{Contact, Page, PageRequest};

/// Column list used in SELECT statements.
const COLS: &str = "id, name, email, title, phone, address, status, photo_url";

/// Get a contact by ID.
pub fn find_by_id(conn: &Connection, id: &ContactId) -> Result<Option<Contact>> {
    let q = format!("SELECT {COLS} FROM contacts WHERE id = ?1");
    conn.query_row(&q, [id.as_str()], Contact::from_row)
        .optional()
        .map_err(Error::database)
}

/// Total number of stored contacts.
pub fn count(conn: &Connection) -> Result<u64> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))
        .map_err(Error::database)?;
    Ok(n as u64)
}

/// List one page of contacts ordered by name (id breaks ties).
pub fn find_all(conn: &Connection, request: PageRequest) -> Result<Page<Contact>> {
    let total = count(conn)?;

    let q = format!("SELECT {COLS} FROM contacts ORDER BY name ASC, id ASC LIMIT ?1 OFFSET ?2");
    let mut stmt = conn.prepare(&q).map_err(Error::database)?;
    let rows = stmt
        .query_map(
            rusqlite::params![
                i64::from(request.size()),
                // SQLite reads a negative OFFSET as 0; clamp instead of wrapping.
                i64::try_from(request.offset()).unwrap_or(i64::MAX)
            ],
            Contact::from_row,
        )
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;

    Ok(Page::new(rows, request, total))
}

/// Insert the contact, or replace every column of the existing row with the
/// same id.
pub fn save(conn: &Connection, contact: &Contact) -> Result<Contact> {
    conn.execute(
        "INSERT INTO contacts (id, name, email, title, phone, address, status, photo_url)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)
         ON CONFLICT(id) DO UPDATE SET
            name=excluded.name, email=excluded.email, title=excluded.title,
            phone=excluded.phone, address=excluded.address, status=excluded.status,
            photo_url=excluded.photo_url",
        rusqlite::params![
            contact.id.as_str(),
            contact.name,
            contact.email,
            contact.title,
            contact.phone,
            contact.address,
            contact.status,
            contact.photo_url,
        ],
    )
    .map_err(Error::database)?;

    Ok(contact.clone())
}

/// Delete a contact by ID. Returns `false` when no row matched.
pub fn delete(conn: &Connection, id: &ContactId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM contacts WHERE id = ?1", [id.as_str()])
        .map_err(Error::database)?;
    Ok(n > 0)
}
