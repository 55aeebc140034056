//! PDF loading — per-page text extraction via `lopdf`.

use crate::ingest::IngestError;
use lopdf::Document as PdfDocument;
use std::path::Path;
use tracing::{debug, warn};

/// The text of one PDF page.
#[derive(Debug, Clone)]
pub struct PageText {
    /// 0-based page index
    pub page: u32,
    pub text: String,
}

/// Extract text from every page of a PDF.
///
/// Pages whose text cannot be extracted are logged and skipped; pages with
/// only whitespace are dropped. Page indices stay 0-based — the citation
/// formatter adds 1 for display.
pub fn load_pdf(path: &Path) -> Result<Vec<PageText>, IngestError> {
    let doc = PdfDocument::load(path)
        .map_err(|e| IngestError::Pdf(format!("{}: {e}", path.display())))?;

    let pages = doc.get_pages();
    debug!(path = %path.display(), pages = pages.len(), "Loading PDF");

    let mut result = Vec::new();
    for (index, (page_num, _)) in pages.iter().enumerate() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) if !text.trim().is_empty() => {
                result.push(PageText {
                    page: index as u32,
                    text,
                });
            }
            Ok(_) => {}
            Err(e) => {
                warn!(page = page_num, "Failed to extract text from page: {e}");
            }
        }
    }

    if result.is_empty() {
        return Err(IngestError::Pdf(format!(
            "{}: no extractable text",
            path.display()
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let err = load_pdf(Path::new("/nonexistent/guide.pdf")).unwrap_err();
        assert!(matches!(err, IngestError::Pdf(_)));
    }

    #[test]
    fn non_pdf_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.pdf");
        std::fs::write(&path, "plain text, not a PDF").unwrap();

        let err = load_pdf(&path).unwrap_err();
        assert!(matches!(err, IngestError::Pdf(_)));
    }
}
