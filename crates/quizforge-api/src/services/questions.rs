use quizforge_core::formats::{sanitize_filename, ExtractedText, FormatValidation, PdfExtractor};
use quizforge_core::models::{GenerationParams, PageRange};
use quizforge_core::processing::{parse_questions, question_prompt, truncate_chars};
use quizforge_llm::GenerateOptions;

use crate::dto::{PdfMetadata, ProcessPdfResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Characters of extracted text echoed back to the client
pub const TEXT_PREVIEW_CHARS: usize = 1000;

/// An uploaded PDF as received from the multipart form
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Service for generating questions from uploaded PDFs
pub struct QuestionService;

impl QuestionService {
    /// Extract the selected pages and ask the generator for questions
    pub async fn generate(
        state: &AppState,
        upload: PdfUpload,
        params: GenerationParams,
    ) -> Result<ProcessPdfResponse, ApiError> {
        let validation = FormatValidation::for_pdf_upload(&upload.filename, &upload.data);
        if !validation.is_valid() {
            tracing::warn!(
                filename = %upload.filename,
                errors = ?validation.errors,
                "Rejected PDF upload"
            );
            return Err(ApiError::bad_request("Invalid PDF upload")
                .with_details(validation.errors.join("; ")));
        }

        let filename = sanitize_filename(&upload.filename);
        for warning in &validation.warnings {
            tracing::warn!(filename = %filename, warning = %warning, "Suspicious PDF upload");
        }

        let extracted = Self::extract(&filename, upload.data, params.page_range).await?;
        if !extracted.has_text() {
            return Err(ApiError::bad_request(
                "No extractable text found in the selected pages",
            ));
        }

        tracing::info!(
            filename = %filename,
            pages_processed = extracted.pages_processed,
            total_pages = extracted.total_pages,
            word_count = extracted.word_count,
            "Extracted PDF text"
        );

        let prompt = question_prompt(&extracted.text, &params);
        let raw = state
            .generator
            .generate(&prompt, &GenerateOptions::default())
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %state.generator.model_name(),
                    "Question generation failed"
                );
                ApiError::internal("Failed to process PDF")
            })?;

        let parsed = parse_questions(&raw, params.question_type);
        if parsed.len() != params.num_questions as usize {
            tracing::debug!(
                requested = params.num_questions,
                parsed = parsed.len(),
                "Generator output did not match the requested question count"
            );
        }

        Ok(ProcessPdfResponse {
            parsed,
            text: truncate_chars(&extracted.text, TEXT_PREVIEW_CHARS).to_string(),
            metadata: PdfMetadata {
                pages_processed: extracted.pages_processed,
                total_pages: extracted.total_pages,
                page_range: params.page_range,
                word_count: extracted.word_count,
                filename,
                question_type: params.question_type,
                num_questions: params.num_questions,
            },
            questions: raw,
        })
    }

    /// Write the upload to a scratch directory and extract it off the runtime
    async fn extract(
        filename: &str,
        data: Vec<u8>,
        range: PageRange,
    ) -> Result<ExtractedText, ApiError> {
        // Removed when dropped, whichever way this function returns
        let temp_dir = tempfile::tempdir().map_err(|e| {
            tracing::error!(error = %e, "Failed to create temp directory");
            ApiError::internal("Failed to save PDF file")
        })?;

        let temp_path = temp_dir.path().join(filename);
        tokio::fs::write(&temp_path, &data).await.map_err(|e| {
            tracing::error!(error = %e, path = %temp_path.display(), "Failed to write upload");
            ApiError::internal("Failed to save PDF file")
        })?;

        let result = tokio::task::spawn_blocking(move || PdfExtractor::extract(&temp_path, range))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "PDF extraction task failed");
                ApiError::internal("Failed to process PDF")
            })?;

        drop(temp_dir);
        result.map_err(ApiError::from)
    }
}
