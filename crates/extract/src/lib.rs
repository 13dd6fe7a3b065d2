//! Text extraction from uploaded documents.
//!
//! PDFs get real text extraction; images get a fixed placeholder
//! (no OCR), so the chat still knows a file is present.

mod img;
mod pdf;

use medchat_core::FileKind;
use thiserror::Error;

pub use img::describe_image;
pub use pdf::extract_pdf;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// Extract text from stored file bytes based on kind.
///
/// Only the PDF arm can fail. Image problems are reported in-band as
/// text, so the upload still succeeds with whatever string comes back.
pub fn extract(kind: FileKind, stored_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    match kind {
        FileKind::Pdf => pdf::extract_pdf(bytes),
        FileKind::Png | FileKind::Jpg | FileKind::Jpeg => Ok(img::describe_image(stored_name, bytes)),
    }
}
