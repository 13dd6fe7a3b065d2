//! Durable storage for uploaded documents.
//!
//! Files are written under a flat directory with a uuid-prefixed name,
//! so repeat uploads of the same filename never collide and stored
//! names are safe to hand back as URL path segments.

use std::path::{Path, PathBuf};

use medchat_core::config::UploadConfig;
use medchat_core::FileKind;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No selected file")]
    NoFileSelected,
    #[error("File type not allowed")]
    InvalidFileType,
    #[error("File exceeds {limit} byte limit ({size} bytes)")]
    PayloadTooLarge { size: usize, limit: u64 },
    #[error("Failed to save file: {0}")]
    Storage(#[from] std::io::Error),
}

/// A file accepted and written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub stored_name: String,
    pub kind: FileKind,
    pub url: String,
}

pub struct UploadStore {
    dir: PathBuf,
    max_bytes: u64,
    public_base_url: Option<String>,
}

impl UploadStore {
    /// Create the store, ensuring the upload directory exists.
    pub fn new(config: &UploadConfig) -> std::io::Result<Self> {
        std::fs::create_dir_all(&config.dir)?;
        Ok(Self {
            dir: config.dir.clone(),
            max_bytes: config.max_bytes,
            public_base_url: config.public_base_url.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist an upload. Checks run in order: a name must
    /// be present, its extension allowed, and the payload under the
    /// size ceiling. Nothing touches disk until all checks pass.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredUpload, UploadError> {
        if original_name.is_empty() {
            return Err(UploadError::NoFileSelected);
        }
        let kind = FileKind::from_filename(original_name).ok_or(UploadError::InvalidFileType)?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(UploadError::PayloadTooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        tokio::fs::write(self.dir.join(&stored_name), bytes).await?;

        Ok(StoredUpload {
            url: self.url_for(&stored_name),
            stored_name,
            kind,
        })
    }

    /// Delete a stored file. Missing files are fine (already gone).
    pub async fn remove(&self, stored_name: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(stored_name)).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove stored file '{}': {}", stored_name, e);
            }
        }
    }

    /// Retrieval URL for a stored name: absolute when a public base is
    /// configured, host-relative otherwise.
    fn url_for(&self, stored_name: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/uploads/{}", base.trim_end_matches('/'), stored_name),
            None => format!("/uploads/{}", stored_name),
        }
    }
}

/// Reduce a client-supplied filename to a safe basename: take the final
/// path component, replace everything outside `[A-Za-z0-9._-]` with
/// `_`, and strip leading dots. Falls back to "file" when nothing
/// survives.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path, max_bytes: u64) -> UploadStore {
        UploadStore::new(&UploadConfig {
            dir: dir.join("uploads"),
            max_bytes,
            public_base_url: None,
        })
        .unwrap()
    }

    #[test]
    fn sanitize_keeps_safe_names() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("lab_results-2.png"), "lab_results-2.png");
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(sanitize_filename("..\\..\\boot.png"), "boot.png");
        assert_eq!(sanitize_filename("my report (final).pdf"), "my_report__final_.pdf");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
    }

    #[test]
    fn sanitize_never_returns_empty() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("..."), "file");
        assert_eq!(sanitize_filename("///"), "file");
    }

    #[tokio::test]
    async fn save_writes_uuid_prefixed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path(), 1024);

        let stored = store.save("scan.pdf", b"%PDF-fake").await.unwrap();
        assert!(stored.stored_name.ends_with("_scan.pdf"));
        assert_eq!(stored.kind, FileKind::Pdf);
        assert_eq!(stored.url, format!("/uploads/{}", stored.stored_name));

        let on_disk = std::fs::read(store.dir().join(&stored.stored_name)).unwrap();
        assert_eq!(on_disk, b"%PDF-fake");
    }

    #[tokio::test]
    async fn save_rejects_bad_inputs_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path(), 16);

        let err = store.save("", b"x").await.unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));

        let err = store.save("notes.txt", b"x").await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidFileType));

        let err = store.save("big.pdf", &[0u8; 17]).await.unwrap_err();
        assert!(matches!(err, UploadError::PayloadTooLarge { size: 17, limit: 16 }));

        let entries: Vec<_> = std::fs::read_dir(store.dir()).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn exactly_at_limit_is_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path(), 16);
        assert!(store.save("ok.pdf", &[0u8; 16]).await.is_ok());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path(), 1024);

        let stored = store.save("scan.pdf", b"data").await.unwrap();
        store.remove(&stored.stored_name).await;
        assert!(!store.dir().join(&stored.stored_name).exists());
        // Second remove of a now-missing file must not blow up.
        store.remove(&stored.stored_name).await;
    }

    #[tokio::test]
    async fn public_base_url_makes_absolute_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(&UploadConfig {
            dir: tmp.path().join("uploads"),
            max_bytes: 1024,
            public_base_url: Some("https://files.example.com/".to_string()),
        })
        .unwrap();

        let stored = store.save("scan.pdf", b"data").await.unwrap();
        assert!(stored
            .url
            .starts_with("https://files.example.com/uploads/"));
    }
}
