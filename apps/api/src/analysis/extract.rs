use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use pdf_extract::{output_doc_page, Document, PlainTextOutput};
use tracing::{debug, warn};

use crate::analysis::AnalysisError;

/// Extracts the text of every page of the PDF at `path`, in page order.
///
/// Page texts are concatenated exactly as the decoder returns them: no
/// separators are inserted, nothing is trimmed or deduplicated. A page whose
/// content cannot be decoded is skipped like an image-only page.
///
/// Blocking: callers on the async runtime should use `spawn_blocking`.
pub fn extract_text(path: &Path) -> Result<String, AnalysisError> {
    let mut document = Document::load(path).map_err(|e| {
        AnalysisError::Extraction(format!("failed to open PDF '{}': {e}", path.display()))
    })?;
    if document.is_encrypted() {
        document.decrypt("").map_err(|e| {
            AnalysisError::Extraction(format!("encrypted PDF '{}': {e}", path.display()))
        })?;
    }

    let pages = document.get_pages();
    debug!(path = %path.display(), pages = pages.len(), "loaded PDF");

    let mut text = String::new();
    // get_pages is a BTreeMap keyed by page number, so iteration is in page order.
    for page_number in pages.keys().copied() {
        match page_text(&document, page_number) {
            Ok(page) if !page.trim().is_empty() => text.push_str(&page),
            Ok(_) => debug!(page_number, "page has no text layer"),
            Err(reason) => warn!(page_number, "skipping undecodable page: {reason}"),
        }
    }

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyText);
    }

    Ok(text)
}

/// Decodes a single page. The decoder panics on some malformed fonts and
/// content streams, so a panic is reported as an error for that page only.
fn page_text(document: &Document, page_number: u32) -> Result<String, String> {
    let decoded = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut page = String::new();
        output_doc_page(document, &mut PlainTextOutput::new(&mut page), page_number)?;
        Ok::<_, pdf_extract::OutputError>(page)
    }));

    match decoded {
        Ok(Ok(page)) => Ok(page),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("decoder panicked".to_string()),
    }
}
