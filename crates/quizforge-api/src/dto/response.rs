use chrono::{DateTime, Utc};
use quizforge_core::models::{PageRange, Question, QuestionType};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub storage: &'static str,
}

impl HealthResponse {
    pub fn ok(storage: &'static str) -> Self {
        Self {
            status: "ok",
            service: "quizforge-api",
            storage,
        }
    }
}

/// Generated questions for an uploaded PDF
#[derive(Debug, Serialize)]
pub struct ProcessPdfResponse {
    /// Raw generator output
    pub questions: String,
    /// Best-effort structured view of `questions`
    pub parsed: Vec<Question>,
    /// Preview of the extracted text
    pub text: String,
    pub metadata: PdfMetadata,
}

#[derive(Debug, Serialize)]
pub struct PdfMetadata {
    pub pages_processed: usize,
    pub total_pages: usize,
    pub page_range: PageRange,
    pub word_count: usize,
    pub filename: String,
    pub question_type: QuestionType,
    pub num_questions: u32,
}

/// Body returned when the generator fails during evaluation
#[derive(Debug, Serialize)]
pub struct EvaluationFailure {
    pub score: f64,
    pub feedback: &'static str,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            feedback: "Evaluation failed",
            error: error.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub answer: String,
    pub query: String,
    pub status: &'static str,
}

impl SearchResponse {
    pub fn success(answer: String, query: String) -> Self {
        Self {
            answer,
            query,
            status: "success",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub status: &'static str,
    pub report_count: u32,
}

impl ReportResponse {
    pub fn reported(report_count: u32) -> Self {
        Self {
            status: "Message reported",
            report_count,
        }
    }
}
