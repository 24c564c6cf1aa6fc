mod evaluation;
mod questions;
mod search;

pub use evaluation::EvaluationService;
pub use questions::{PdfUpload, QuestionService, TEXT_PREVIEW_CHARS};
pub use search::{SearchService, MIN_QUERY_CHARS};
