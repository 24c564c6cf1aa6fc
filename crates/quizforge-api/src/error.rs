use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quizforge_core::error::QuizforgeError;
use serde::Serialize;

pub const PAGE_RANGE_MESSAGE: &str = "Invalid page range format. Use '1-5'";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<QuizforgeError> for ApiError {
    fn from(err: QuizforgeError) -> Self {
        match &err {
            QuizforgeError::ThreadNotFound(_) => Self::not_found("Thread not found"),
            QuizforgeError::MessageNotFound(_) => Self::not_found("Message not found"),
            QuizforgeError::InvalidPageRange(_) => Self::bad_request(PAGE_RANGE_MESSAGE),
            QuizforgeError::InvalidParameter { .. } => {
                Self::bad_request("Invalid request").with_details(err.to_string())
            }
            QuizforgeError::DocumentExtraction { .. } => {
                tracing::warn!(error = %err, "Document could not be read");
                Self::bad_request("Failed to process PDF")
            }
            _ => {
                tracing::error!(error = %err, "Request failed");
                Self::internal(INTERNAL_MESSAGE)
            }
        }
    }
}
