use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use quizforge_core::formats::has_pdf_extension;
use quizforge_core::models::{GenerationParams, PageRange, QuestionType};

use crate::dto::ProcessPdfResponse;
use crate::error::{ApiError, PAGE_RANGE_MESSAGE};
use crate::services::{PdfUpload, QuestionService};
use crate::state::AppState;

/// Raw multipart fields of a question generation request
#[derive(Debug, Default)]
struct ProcessPdfForm {
    pdf: Option<PdfUpload>,
    page_range: Option<String>,
    num_questions: Option<String>,
    question_type: Option<String>,
}

pub async fn process_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessPdfResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a multipart form");
        ApiError::bad_request("No file uploaded")
    })?;
    let form = read_form(&mut multipart).await?;

    let upload = form.pdf.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    if upload.filename.trim().is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    if !has_pdf_extension(&upload.filename) {
        return Err(ApiError::bad_request("Only PDF files are allowed"));
    }
    if upload.data.is_empty() {
        return Err(ApiError::bad_request("Failed to save PDF file"));
    }

    let page_range: PageRange = form
        .page_range
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(|_| ApiError::bad_request(PAGE_RANGE_MESSAGE))?;

    let params = parse_params(form.num_questions.as_deref(), form.question_type.as_deref(), page_range)
        .ok_or_else(|| ApiError::bad_request("Invalid question parameters"))?;

    tracing::info!(
        filename = %upload.filename,
        size = upload.data.len(),
        page_range = %params.page_range,
        num_questions = params.num_questions,
        question_type = %params.question_type,
        "Processing PDF"
    );

    let response = QuestionService::generate(&state, upload, params).await?;
    Ok(Json(response))
}

async fn read_form(multipart: &mut Multipart) -> Result<ProcessPdfForm, ApiError> {
    let mut form = ProcessPdfForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::new(e.status(), "Failed to parse multipart form").with_details(e.body_text())
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError::new(e.status(), "Failed to read file data")
                        .with_details(e.body_text())
                })?;
                form.pdf = Some(PdfUpload {
                    filename,
                    data: data.to_vec(),
                });
            }
            "page_range" | "num_questions" | "question_type" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request("Failed to read form field").with_details(e.body_text())
                })?;
                match name.as_str() {
                    "page_range" => form.page_range = Some(value),
                    "num_questions" => form.num_questions = Some(value),
                    _ => form.question_type = Some(value),
                }
            }
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}

fn parse_params(
    num_questions: Option<&str>,
    question_type: Option<&str>,
    page_range: PageRange,
) -> Option<GenerationParams> {
    let num_questions = match num_questions {
        Some(raw) => raw.trim().parse::<u32>().ok()?,
        None => GenerationParams::default().num_questions,
    };
    let question_type = match question_type {
        Some(raw) => raw.trim().parse::<QuestionType>().ok()?,
        None => QuestionType::default(),
    };

    let params = GenerationParams {
        num_questions,
        question_type,
        page_range,
    };
    params.validate().ok()?;
    Some(params)
}
