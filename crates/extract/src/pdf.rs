use crate::ExtractError;

/// Extract plain text from PDF bytes.
///
/// Malformed or encrypted documents fail here; a well-formed PDF with
/// no text layer (a scan) succeeds with an empty string.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(assemble_pages(&raw))
}

/// Rebuild document text from pdf-extract's single-string output.
///
/// pdf-extract returns all pages as one string with form feed (\x0C)
/// separators. Pages are re-joined with single newlines in document
/// order; pages without a text layer contribute empty strings, so the
/// boundary stays visible without inventing content.
fn assemble_pages(raw: &str) -> String {
    let joined = raw
        .split('\x0C')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_pages_in_order() {
        let raw = "page one\n\x0Cpage two\n\x0Cpage three\n";
        assert_eq!(assemble_pages(raw), "page one\npage two\npage three");
    }

    #[test]
    fn single_page_has_no_separator() {
        assert_eq!(assemble_pages("only page\n"), "only page");
    }

    #[test]
    fn empty_interior_page_keeps_its_slot() {
        let raw = "first\n\x0C\x0Cthird\n";
        assert_eq!(assemble_pages(raw), "first\n\nthird");
    }

    #[test]
    fn trailing_separator_adds_nothing() {
        let raw = "first\n\x0Csecond\n\x0C";
        assert_eq!(assemble_pages(raw), "first\nsecond");
    }

    #[test]
    fn scanned_document_collapses_to_empty() {
        assert_eq!(assemble_pages(""), "");
        assert_eq!(assemble_pages("\x0C\x0C"), "");
        assert_eq!(assemble_pages(" \n\x0C \n"), "");
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let err = extract_pdf(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
