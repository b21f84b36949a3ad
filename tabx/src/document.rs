//! The PDF document source: given a validated page index set, return the
//! layout text of exactly those pages.

use std::path::Path;

use lopdf::Document;
use thiserror::Error;

/// Document-level failures. Each aborts only the document it occurred in;
/// sibling documents continue.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Only PDF input is supported; files of other types are skipped.
    #[error("unsupported file type: {0} (only PDF is supported)")]
    UnsupportedFileType(String),

    /// The file could not be read or parsed as a PDF.
    #[error("failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// A loaded PDF exposing per-page text.
pub struct PdfDocument {
    doc: Document,
    /// lopdf's 1-based page numbers, ascending.
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    /// Load a PDF from disk. Non-`.pdf` paths are rejected before any IO.
    ///
    /// # Errors
    ///
    /// * `DocumentError::UnsupportedFileType` - the path is not a PDF.
    /// * `DocumentError::Pdf` - the file is corrupt or unreadable.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();

        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(DocumentError::UnsupportedFileType(
                path.display().to_string(),
            ));
        }

        let doc = Document::load(path)?;
        let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        page_numbers.sort_unstable();

        Ok(Self { doc, page_numbers })
    }

    /// Number of pages in the document.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    /// The text of the pages at the given zero-based indices, in ascending
    /// page order, joined by newline. Indices outside the document are
    /// ignored; callers validate them with the page range parser first.
    ///
    /// # Errors
    ///
    /// `DocumentError::Pdf` if any selected page fails to extract.
    pub fn text_for_pages(&self, indices: &[usize]) -> Result<String, DocumentError> {
        let mut pages = Vec::with_capacity(indices.len());

        for &idx in indices {
            if let Some(page_number) = self.page_numbers.get(idx) {
                pages.push(self.doc.extract_text(&[*page_number])?);
            }
        }

        Ok(pages.join("\n"))
    }
}
