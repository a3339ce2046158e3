//! Filesystem-level photo storage.
//!
//! Photos are loose files directly under one directory, named
//! `<contact id><extension>`. Every filename is checked to be a single plain
//! path component before it touches the filesystem, so neither reads nor
//! writes can resolve outside the storage directory.

use std::path::{Component, Path, PathBuf};

use contacts_core::{Error, Result};

/// Filesystem manager for contact photos.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    /// Create a new `PhotoStore` rooted at `dir`. The directory is created
    /// lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve `filename` inside the storage directory, or `None` when it is
    /// not a single plain filename.
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        is_plain_filename(filename).then(|| self.dir.join(filename))
    }

    /// Write `data` to `filename`, replacing any existing file.
    ///
    /// Creates the storage directory (recursively) if it is missing.
    pub fn write(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self
            .path_for(filename)
            .ok_or_else(|| Error::Validation(format!("invalid photo filename: {filename:?}")))?;

        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
            tracing::info!("Created photo directory {}", self.dir.display());
        }

        std::fs::write(&path, data)?;
        tracing::debug!(bytes = data.len(), "Wrote photo {}", path.display());
        Ok(path)
    }

    /// Read the raw bytes of `filename`.
    pub fn read(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self
            .path_for(filename)
            .ok_or_else(|| Error::not_found("photo", filename))?;

        std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_found("photo", filename)
            } else {
                Error::from(e)
            }
        })
    }
}

/// Content type served for a stored photo, chosen by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

fn is_plain_filename(filename: &str) -> bool {
    if filename.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
