use std::fmt;

use serde::{Deserialize, Serialize};

/// File kinds the service accepts for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Png,
    Jpg,
    Jpeg,
}

impl FileKind {
    /// Classify by the final extension segment, case-insensitive.
    /// A name without a dot has no extension and is rejected.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document a session is currently chatting about.
///
/// `content` holds the full extracted text; sessions keep at most one
/// of these, and a new upload replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Unique on-disk name (`{uuid}_{sanitized original}`).
    pub stored_name: String,
    /// Name the client sent, before sanitization.
    pub original_name: String,
    /// Where the stored bytes can be fetched back from.
    pub url: String,
    /// Extracted text (or the image placeholder).
    pub content: String,
    pub kind: FileKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(FileKind::from_filename("report.pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("scan.png"), Some(FileKind::Png));
        assert_eq!(FileKind::from_filename("photo.jpg"), Some(FileKind::Jpg));
        assert_eq!(FileKind::from_filename("photo.jpeg"), Some(FileKind::Jpeg));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(FileKind::from_filename("REPORT.PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("scan.PnG"), Some(FileKind::Png));
    }

    #[test]
    fn only_the_final_segment_counts() {
        assert_eq!(FileKind::from_filename("archive.pdf.exe"), None);
        assert_eq!(FileKind::from_filename("notes.tar.pdf"), Some(FileKind::Pdf));
    }

    #[test]
    fn rejects_missing_or_unknown_extensions() {
        assert_eq!(FileKind::from_filename("noextension"), None);
        assert_eq!(FileKind::from_filename("trailing."), None);
        assert_eq!(FileKind::from_filename("doc.txt"), None);
        assert_eq!(FileKind::from_filename(""), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&FileKind::Pdf).unwrap();
        assert_eq!(json, "\"pdf\"");
        let json = serde_json::to_string(&FileKind::Jpeg).unwrap();
        assert_eq!(json, "\"jpeg\"");
    }

    #[test]
    fn image_kinds_are_images() {
        assert!(!FileKind::Pdf.is_image());
        assert!(FileKind::Png.is_image());
        assert!(FileKind::Jpg.is_image());
        assert!(FileKind::Jpeg.is_image());
    }
}
