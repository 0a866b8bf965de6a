//! Uploaded property image storage.
//!
//! Images are written to a flat uploads directory under UUID-based names and
//! referenced everywhere else by their public path (`/uploads/<name>`). A
//! property without an uploaded image gets the configured placeholder path
//! instead; the placeholder itself ships with the static site assets.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::Result;

/// Public URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Storage for uploaded property images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    /// Directory uploaded files are written to.
    uploads_dir: PathBuf,
    /// Image reference used when no file was uploaded.
    placeholder: String,
}

impl ImageStore {
    /// Create a new ImageStore rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(uploads_dir: impl Into<PathBuf>, placeholder: impl Into<String>) -> Result<Self> {
        let uploads_dir = uploads_dir.into();
        fs::create_dir_all(&uploads_dir)?;

        Ok(Self {
            uploads_dir,
            placeholder: placeholder.into(),
        })
    }

    /// Directory uploaded files are written to.
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Image reference for properties without an upload.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Save uploaded content under a fresh UUID-based name.
    ///
    /// The extension is taken from the client's filename; everything else
    /// about that name is discarded. Returns the public reference path
    /// (`/uploads/<uuid>.<ext>`).
    pub fn save(&self, content: &[u8], original_name: &str) -> Result<String> {
        let stored_name = format!("{}.{}", Uuid::new_v4(), extract_extension(original_name));
        fs::write(self.uploads_dir.join(&stored_name), content)?;
        Ok(format!("{PUBLIC_PREFIX}/{stored_name}"))
    }

    /// Delete a stored image by its public reference path.
    ///
    /// Returns `true` if a file was removed. References outside the uploads
    /// prefix (the placeholder, external URLs) are ignored, as are names that
    /// would escape the uploads directory.
    pub fn delete(&self, reference: &str) -> Result<bool> {
        let Some(name) = reference.strip_prefix(&format!("{PUBLIC_PREFIX}/")) else {
            return Ok(false);
        };
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Ok(false);
        }

        match fs::remove_file(self.uploads_dir.join(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Extract the file extension from a client-supplied filename.
///
/// Returns "bin" if no extension is present.
fn extract_extension(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ImageStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ImageStore::new(
            temp_dir.path().join("uploads"),
            "/assets/img/property-placeholder.jpg",
        )
        .unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_new_creates_directory() {
        let (temp_dir, store) = setup();
        assert!(temp_dir.path().join("uploads").exists());
        assert_eq!(store.uploads_dir(), temp_dir.path().join("uploads"));
    }

    #[test]
    fn test_save_returns_public_reference() {
        let (_temp_dir, store) = setup();

        let reference = store.save(b"jpeg bytes", "villa.jpg").unwrap();
        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with(".jpg"));

        let name = reference.strip_prefix("/uploads/").unwrap();
        let on_disk = fs::read(store.uploads_dir().join(name)).unwrap();
        assert_eq!(on_disk, b"jpeg bytes");
    }

    #[test]
    fn test_save_discards_client_filename() {
        let (_temp_dir, store) = setup();

        let reference = store.save(b"data", "../../etc/passwd.png").unwrap();
        let name = reference.strip_prefix("/uploads/").unwrap();
        assert!(!name.contains('/'));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_save_unique_names() {
        let (_temp_dir, store) = setup();

        let a = store.save(b"one", "same.jpg").unwrap();
        let b = store.save(b"two", "same.jpg").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_extension_default() {
        let (_temp_dir, store) = setup();
        let reference = store.save(b"data", "no_extension").unwrap();
        assert!(reference.ends_with(".bin"));
    }

    #[test]
    fn test_delete_by_reference() {
        let (_temp_dir, store) = setup();

        let reference = store.save(b"data", "villa.jpg").unwrap();
        assert!(store.delete(&reference).unwrap());
        assert!(!store.delete(&reference).unwrap());
    }

    #[test]
    fn test_delete_ignores_non_upload_references() {
        let (_temp_dir, store) = setup();

        assert!(!store.delete(store.placeholder().to_string().as_str()).unwrap());
        assert!(!store.delete("https://cdn.example.com/villa.jpg").unwrap());
        assert!(!store.delete("/uploads/../secret.txt").unwrap());
        assert!(!store.delete("/uploads/").unwrap());
    }
}
