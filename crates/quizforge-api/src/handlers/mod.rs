mod evaluation;
mod health;
mod questions;
mod search;
mod threads;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};

use crate::error::ApiError;

pub use evaluation::evaluate_answer;
pub use health::health_check;
pub use questions::process_pdf;
pub use search::web_search;
pub use threads::{
    add_message, create_thread, delete_thread, get_thread, list_threads, report_message,
};

/// Fallback for unmatched routes
pub async fn not_found() -> impl IntoResponse {
    ApiError::not_found("Endpoint not found")
}

/// Map an unreadable JSON body to the endpoint's validation message.
/// Oversized bodies keep their 413.
pub(crate) fn json_rejection(rejection: JsonRejection, message: &str) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %rejection.body_text(), "Rejected oversized JSON body");
        return ApiError::new(rejection.status(), "Request body too large")
            .with_details(rejection.body_text());
    }
    ApiError::bad_request(message)
}
