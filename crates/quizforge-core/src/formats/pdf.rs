use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{QuizforgeError, Result};
use crate::models::PageRange;

/// Text pulled from a PDF for a selected page range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Selected pages joined with newlines
    pub text: String,

    /// Number of pages that fell inside the range
    pub pages_processed: usize,

    /// Page count of the whole document
    pub total_pages: usize,

    /// Whitespace-separated token count of `text`
    pub word_count: usize,
}

impl ExtractedText {
    /// Keep the pages selected by `range` and join them
    pub fn from_pages(pages: Vec<String>, range: PageRange) -> Self {
        let total_pages = pages.len();
        let (from, to) = range.bounds(total_pages);

        let selected = &pages[from..to];
        let text = selected.join("\n");
        let word_count = text.split_whitespace().count();

        Self {
            text,
            pages_processed: selected.len(),
            total_pages,
            word_count,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// PDF text extractor
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from the PDF at `path`, restricted to `range`
    ///
    /// This is CPU-bound; async callers should run it on a blocking thread.
    pub fn extract(path: &Path, range: PageRange) -> Result<ExtractedText> {
        let pages = Self::extract_pages(path)?;
        let extracted = ExtractedText::from_pages(pages, range);

        if !extracted.has_text() {
            tracing::warn!(
                path = %path.display(),
                page_range = %range,
                "PDF selection contains no extractable text"
            );
        }

        Ok(extracted)
    }

    /// Extract the text of every page in document order
    pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_by_pages(path)));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(QuizforgeError::DocumentExtraction {
                format: "PDF".to_string(),
                reason: format!("Failed to extract text: {}", e),
            }),
            Err(_) => Err(QuizforgeError::DocumentExtraction {
                format: "PDF".to_string(),
                reason: "PDF parser aborted on malformed input".to_string(),
            }),
        }
    }
}
