//! Document format handling
//!
//! Uploaded documents are validated by name and header before any parsing,
//! then handed to a format-specific extractor.

pub mod pdf;
pub mod validation;

pub use pdf::{ExtractedText, PdfExtractor};
pub use validation::{has_pdf_extension, looks_like_pdf, sanitize_filename, FormatValidation};
