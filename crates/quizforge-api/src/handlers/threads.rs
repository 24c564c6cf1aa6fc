use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use quizforge_core::models::{Message, NewMessage, NewThread, Thread};

use crate::dto::{CreateMessageRequest, CreateThreadRequest, DeleteResponse, ReportResponse};
use super::json_rejection;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_threads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Thread>>, ApiError> {
    let threads = state.thread_store.list_threads().await?;
    tracing::debug!(count = threads.len(), "Listed threads");
    Ok(Json(threads))
}

pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CreateThreadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Thread>), ApiError> {
    const MISSING: &str = "Missing title or description";
    let missing = || ApiError::bad_request(MISSING);

    let Json(request) = request.map_err(|e| json_rejection(e, MISSING))?;
    let new = NewThread::new(
        request.title.as_deref().unwrap_or(""),
        request.description.as_deref().unwrap_or(""),
    )
    .map_err(|_| missing())?;

    let thread = state.thread_store.create_thread(new).await?;
    tracing::info!(thread_id = %thread.id, title = %thread.title, "Created thread");

    Ok((StatusCode::CREATED, Json(thread)))
}

pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> Result<Json<Thread>, ApiError> {
    state
        .thread_store
        .get_thread(&thread_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Thread not found"))
}

pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.thread_store.delete_thread(&thread_id).await? {
        return Err(ApiError::not_found("Thread not found"));
    }

    tracing::info!(thread_id = %thread_id, "Deleted thread");
    Ok(Json(DeleteResponse {
        message: "Thread deleted successfully",
    }))
}

pub async fn add_message(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
    request: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    const MISSING: &str = "Missing text or sender";
    let missing = || ApiError::bad_request(MISSING);

    let Json(request) = request.map_err(|e| json_rejection(e, MISSING))?;
    let new = NewMessage::new(
        request.text.as_deref().unwrap_or(""),
        request.sender.as_deref().unwrap_or(""),
    )
    .map_err(|_| missing())?;

    let message = state
        .thread_store
        .add_message(&thread_id, new)
        .await?
        .ok_or_else(|| ApiError::not_found("Thread not found"))?;

    tracing::info!(thread_id = %thread_id, message_id = %message.id, "Added message");
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn report_message(
    State(state): State<Arc<AppState>>,
    Path((thread_id, message_id)): Path<(String, String)>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report_count = state.thread_store.record_report(&thread_id, &message_id).await?;

    tracing::warn!(
        thread_id = %thread_id,
        message_id = %message_id,
        report_count = report_count,
        "Message reported"
    );
    Ok(Json(ReportResponse::reported(report_count)))
}
