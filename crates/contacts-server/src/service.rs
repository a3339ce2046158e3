//! Contact service coordinating the database and the photo store.
//!
//! Each mutating operation runs inside a single database transaction. Photo
//! files are written before the record is saved and are not covered by that
//! transaction: if the save fails, the file stays on disk.

use contacts_core::{ContactId, Error, Result};
use contacts_db::models::{Contact, Page, PageRequest};
use contacts_db::pool::{get_conn, DbPool};
use contacts_db::queries::contacts;
use rusqlite::TransactionBehavior;

use crate::photos::{content_type_for, PhotoStore};

/// Extension used when the uploaded filename has none.
const DEFAULT_PHOTO_EXTENSION: &str = ".png";

/// High-level contact operations used by the HTTP handlers.
pub struct ContactService {
    db: DbPool,
    photos: PhotoStore,
}

impl ContactService {
    pub fn new(db: DbPool, photos: PhotoStore) -> Self {
        Self { db, photos }
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    /// One page of contacts sorted by name.
    pub fn list(&self, page: u32, size: u32) -> Result<Page<Contact>> {
        let request = PageRequest::new(page, size)?;
        let conn = get_conn(&self.db)?;
        contacts::find_all(&conn, request)
    }

    pub fn get(&self, id: &ContactId) -> Result<Contact> {
        let conn = get_conn(&self.db)?;
        contacts::find_by_id(&conn, id)?.ok_or_else(|| Error::not_found("contact", id))
    }

    /// Persist a new contact, generating an id when none was supplied.
    ///
    /// A supplied id that already exists replaces the stored record.
    pub fn create(&self, mut contact: Contact) -> Result<Contact> {
        if contact.id.is_empty() {
            contact.id = ContactId::generate();
        }

        let mut conn = get_conn(&self.db)?;
        let tx = conn.transaction().map_err(Error::database)?;
        let saved = contacts::save(&tx, &contact)?;
        tx.commit().map_err(Error::database)?;

        tracing::info!(contact_id = %saved.id, "Created contact");
        Ok(saved)
    }

    pub fn delete(&self, id: &ContactId) -> Result<()> {
        let mut conn = get_conn(&self.db)?;
        let tx = conn.transaction().map_err(Error::database)?;
        if !contacts::delete(&tx, id)? {
            return Err(Error::not_found("contact", id));
        }
        tx.commit().map_err(Error::database)?;

        tracing::info!(contact_id = %id, "Deleted contact");
        Ok(())
    }

    /// Store a photo for an existing contact and record its URL.
    ///
    /// The file is named `<id><ext>` where `ext` comes from
    /// [`file_extension`]. An upload with a different extension than the
    /// previous one leaves the older file in place. Returns the photo URL,
    /// `<base_url>/contacts/image/<filename>`.
    pub fn upload_photo(
        &self,
        id: &ContactId,
        data: &[u8],
        original_filename: Option<&str>,
        base_url: &str,
    ) -> Result<String> {
        tracing::info!(contact_id = %id, "Saving photo for contact");

        // Read-then-write, so the write lock is taken before the lookup.
        let mut conn = get_conn(&self.db)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(Error::database)?;

        let mut contact =
            contacts::find_by_id(&tx, id)?.ok_or_else(|| Error::not_found("contact", id))?;

        let filename = format!("{id}{}", file_extension(original_filename.unwrap_or_default()));
        self.photos.write(&filename, data)?;

        let url = photo_url(base_url, &filename);
        contact.photo_url = Some(url.clone());
        contacts::save(&tx, &contact)?;
        tx.commit().map_err(Error::database)?;

        Ok(url)
    }

    /// Raw bytes and content type of a stored photo. No contact lookup is
    /// involved.
    pub fn photo(&self, filename: &str) -> Result<(Vec<u8>, &'static str)> {
        let data = self.photos.read(filename)?;
        Ok((data, content_type_for(filename)))
    }
}

/// Extension of an uploaded filename: everything from the last `.`, or
/// `.png` when there is no `.` at all. `"photo."` yields `"."`.
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx..],
        None => DEFAULT_PHOTO_EXTENSION,
    }
}

/// Public retrieval URL for a stored photo.
pub fn photo_url(base_url: &str, filename: &str) -> String {
    format!("{}/contacts/image/{filename}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts_db::pool::init_memory_pool;

    fn setup() -> (ContactService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_memory_pool().unwrap();
        let service = ContactService::new(pool, PhotoStore::new(dir.path().join("uploads")));
        (service, dir)
    }

    fn named(name: &str) -> Contact {
        Contact {
            name: Some(name.to_string()),
            phone: Some("555-0100".into()),
            ..Contact::default()
        }
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.jpg"), ".jpg");
        assert_eq!(file_extension("photo"), ".png");
        assert_eq!(file_extension("photo."), ".");
        assert_eq!(file_extension("a.b.c"), ".c");
        assert_eq!(file_extension(""), ".png");
    }

    #[test]
    fn test_photo_url() {
        assert_eq!(
            photo_url("http://localhost:8080", "u1.png"),
            "http://localhost:8080/contacts/image/u1.png"
        );
        assert_eq!(
            photo_url("https://c.example.com/", "u1.jpg"),
            "https://c.example.com/contacts/image/u1.jpg"
        );
    }

    #[test]
    fn test_create_then_get() {
        let (service, _dir) = setup();
        let input = named("Ann");
        let created = service.create(input.clone()).unwrap();
        assert!(!created.id.is_empty());

        let fetched = service.get(&created.id).unwrap();
        assert_eq!(fetched, Contact { id: created.id.clone(), ..input });
    }

    #[test]
    fn test_create_keeps_supplied_id() {
        let (service, _dir) = setup();
        let created = service
            .create(Contact { id: ContactId::from("u1"), ..named("Ann") })
            .unwrap();
        assert_eq!(created.id.as_str(), "u1");
        assert_eq!(service.get(&ContactId::from("u1")).unwrap().name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let (service, _dir) = setup();
        let err = service.get(&ContactId::from("never-created")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_then_get() {
        let (service, _dir) = setup();
        let created = service.create(named("Ann")).unwrap();

        service.delete(&created.id).unwrap();
        assert!(service.get(&created.id).unwrap_err().is_not_found());
        assert!(service.delete(&created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_is_bounded_and_sorted() {
        let (service, _dir) = setup();
        for name in ["mallory", "Bob", "alice", "Carol", "bob"] {
            service.create(named(name)).unwrap();
        }

        let page = service.list(0, 3).unwrap();
        assert!(page.content.len() <= 3);
        let names: Vec<_> = page.content.iter().filter_map(|c| c.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names, ["Bob", "Carol", "alice"]);
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn test_list_rejects_zero_size() {
        let (service, _dir) = setup();
        assert!(matches!(service.list(0, 0).unwrap_err(), Error::Validation(_)));
    }

    #[test]
    fn test_upload_photo_round_trip() {
        let (service, _dir) = setup();
        let created = service
            .create(Contact { id: ContactId::from("u1"), ..named("Ann") })
            .unwrap();
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

        let url = service
            .upload_photo(&created.id, &bytes, Some("pic.jpg"), "http://localhost:8080")
            .unwrap();
        assert_eq!(url, "http://localhost:8080/contacts/image/u1.jpg");
        assert_eq!(service.get(&created.id).unwrap().photo_url.as_deref(), Some(url.as_str()));

        let (data, content_type) = service.photo("u1.jpg").unwrap();
        assert_eq!(data, bytes);
        assert_eq!(content_type, "image/jpeg");
    }

    #[test]
    fn test_upload_photo_without_extension_defaults_to_png() {
        let (service, _dir) = setup();
        let created = service.create(named("Ann")).unwrap();

        let url = service
            .upload_photo(&created.id, b"img", None, "http://h")
            .unwrap();
        assert!(url.ends_with(&format!("/contacts/image/{}.png", created.id)));
    }

    #[test]
    fn test_upload_photo_unknown_contact_writes_nothing() {
        let (service, _dir) = setup();
        let err = service
            .upload_photo(&ContactId::from("ghost"), b"img", Some("a.png"), "http://h")
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!service.photos().dir().exists());
    }

    #[test]
    fn test_reupload_with_new_extension_leaves_old_file() {
        let (service, _dir) = setup();
        let created = service
            .create(Contact { id: ContactId::from("u1"), ..named("Ann") })
            .unwrap();

        service.upload_photo(&created.id, b"png", Some("a.png"), "http://h").unwrap();
        let url = service.upload_photo(&created.id, b"jpg", Some("b.jpg"), "http://h").unwrap();

        assert_eq!(service.get(&created.id).unwrap().photo_url, Some(url));
        assert_eq!(service.photo("u1.png").unwrap().0, b"png");
        assert_eq!(service.photo("u1.jpg").unwrap().0, b"jpg");
    }

    #[test]
    fn test_concurrent_creates_and_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("contacts.db");
        let pool = contacts_db::pool::init_pool(&db_path.to_string_lossy()).unwrap();
        let service = ContactService::new(pool, PhotoStore::new(dir.path().join("uploads")));

        const THREADS: usize = 4;
        const PER_THREAD: usize = 25;

        let failures: Vec<Error> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let service = &service;
                    s.spawn(move || {
                        let mut errors = Vec::new();
                        for i in 0..PER_THREAD {
                            let id = ContactId::from(format!("t{t}-{i}"));
                            let contact = Contact { id: id.clone(), ..named("Ann") };
                            let result = service.create(contact).and_then(|_| {
                                service.upload_photo(&id, b"img", Some("a.jpg"), "http://h")
                            });
                            if let Err(e) = result {
                                errors.push(e);
                            }
                        }
                        errors
                    })
                })
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        assert!(failures.is_empty(), "{} failures, first: {}", failures.len(), failures[0]);

        let page = service.list(0, 1).unwrap();
        assert_eq!(page.total_elements, (THREADS * PER_THREAD) as u64);
        let contact = service.get(&ContactId::from("t3-24")).unwrap();
        assert_eq!(
            contact.photo_url.as_deref(),
            Some("http://h/contacts/image/t3-24.jpg")
        );
        assert_eq!(service.photo("t0-0.jpg").unwrap().0, b"img");
    }

    #[test]
    fn test_upload_photo_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the photo directory should be.
        let blocker = dir.path().join("uploads");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let service = ContactService::new(init_memory_pool().unwrap(), PhotoStore::new(&blocker));
        let created = service.create(named("Ann")).unwrap();

        let err = service
            .upload_photo(&created.id, b"img", Some("a.png"), "http://h")
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(service.get(&created.id).unwrap().photo_url.is_none());
    }
}
