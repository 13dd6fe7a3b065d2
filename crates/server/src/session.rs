//! In-memory per-session state.
//!
//! Each browser session holds at most one active uploaded file. State
//! lives in a process-local map and is lost on restart; stored files
//! on disk survive but are no longer reachable through a session.

use std::collections::HashMap;
use std::sync::RwLock;

use medchat_core::{FileKind, UploadedFile};
use serde::Serialize;

/// What the status endpoint reveals: metadata only, never content.
#[derive(Debug, Serialize)]
pub struct FileStatus {
    pub has_active_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileKind>,
}

impl FileStatus {
    pub fn none() -> Self {
        Self {
            has_active_file: false,
            filename: None,
            file_type: None,
        }
    }
}

#[derive(Debug, Default)]
struct SessionRecord {
    file: Option<UploadedFile>,
}

/// Session map keyed by the opaque cookie token.
///
/// The lock guards map integrity only. Two requests racing on the same
/// session (upload vs. chat) are not serialized against each other;
/// last write wins on the file slot.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache the uploaded file for this session, replacing any prior one.
    pub fn set_active_file(&self, session_id: &str, file: UploadedFile) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.entry(session_id.to_string()).or_default().file = Some(file);
    }

    pub fn active_file(&self, session_id: &str) -> Option<UploadedFile> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).and_then(|record| record.file.clone())
    }

    /// Drop the active file. Clearing a session with no file (or no
    /// record at all) succeeds quietly.
    pub fn clear_active_file(&self, session_id: &str) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(record) = sessions.get_mut(session_id) {
            record.file = None;
        }
    }

    pub fn file_status(&self, session_id: &str) -> FileStatus {
        match self.active_file(session_id) {
            Some(file) => FileStatus {
                has_active_file: true,
                filename: Some(file.stored_name),
                file_type: Some(file.kind),
            },
            None => FileStatus::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(stored_name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            stored_name: stored_name.to_string(),
            original_name: "orig.pdf".to_string(),
            url: format!("/uploads/{stored_name}"),
            content: content.to_string(),
            kind: FileKind::Pdf,
        }
    }

    #[test]
    fn upload_replaces_previous_file() {
        let store = SessionStore::new();
        store.set_active_file("s1", file("a_one.pdf", "first"));
        store.set_active_file("s1", file("b_two.pdf", "second"));

        let active = store.active_file("s1").unwrap();
        assert_eq!(active.stored_name, "b_two.pdf");
        assert_eq!(active.content, "second");
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::new();
        store.set_active_file("s1", file("a.pdf", "mine"));
        assert!(store.active_file("s2").is_none());
        store.clear_active_file("s2");
        assert!(store.active_file("s1").is_some());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::new();
        store.set_active_file("s1", file("a.pdf", "text"));

        store.clear_active_file("s1");
        assert!(store.active_file("s1").is_none());

        // Again on an already-empty session, and on an unknown one.
        store.clear_active_file("s1");
        store.clear_active_file("never-seen");
        assert!(store.active_file("s1").is_none());
    }

    #[test]
    fn status_reports_metadata_without_content() {
        let store = SessionStore::new();

        let status = store.file_status("s1");
        assert!(!status.has_active_file);
        assert!(status.filename.is_none());

        store.set_active_file("s1", file("u_scan.pdf", "secret text"));
        let status = store.file_status("s1");
        assert!(status.has_active_file);
        assert_eq!(status.filename.as_deref(), Some("u_scan.pdf"));
        assert_eq!(status.file_type, Some(FileKind::Pdf));

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("secret text"));
    }
}
