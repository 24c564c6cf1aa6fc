/// Fallback name for uploads whose filename sanitizes to nothing
pub const DEFAULT_UPLOAD_NAME: &str = "upload.pdf";

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Result of format validation
#[derive(Debug, Clone, Default)]
pub struct FormatValidation {
    /// Validation errors that prevent reading
    pub errors: Vec<String>,

    /// Warnings that don't prevent reading but indicate potential issues
    pub warnings: Vec<String>,
}

impl FormatValidation {
    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Validate an uploaded PDF by name and content header
    pub fn for_pdf_upload(filename: &str, data: &[u8]) -> Self {
        let mut validation = Self::default();

        if !has_pdf_extension(filename) {
            validation.errors.push(format!("Unexpected file extension for '{}' (expected .pdf)", filename));
        }

        if data.is_empty() {
            validation.errors.push("File is empty".to_string());
        } else if !looks_like_pdf(data) {
            validation.warnings.push("File does not start with a PDF header".to_string());
        }

        validation
    }
}

/// Case-insensitive check for a `.pdf` suffix
pub fn has_pdf_extension(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}

/// Check for the `%PDF-` header, tolerating leading whitespace
pub fn looks_like_pdf(data: &[u8]) -> bool {
    let start = data.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(data.len());
    data[start..].starts_with(PDF_MAGIC)
}

/// Reduce a client-supplied filename to a safe single path component
///
/// Only the last path segment is kept. Whitespace runs become `_`, characters
/// outside `[A-Za-z0-9._-]` are dropped, and leading dots or underscores are
/// stripped.
pub fn sanitize_filename(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("");

    let mut out = String::with_capacity(last.len());
    let mut in_space = false;
    for c in last.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
        }
    }

    let trimmed = out.trim_start_matches(['.', '_']).trim_end_matches('_');
    if trimmed.is_empty() {
        DEFAULT_UPLOAD_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
