use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use quizforge_core::error::QuizforgeError;

use crate::dto::{SearchResponse, WebSearchRequest};
use super::json_rejection;
use crate::error::ApiError;
use crate::services::{SearchService, MIN_QUERY_CHARS};
use crate::state::AppState;

pub async fn web_search(
    State(state): State<Arc<AppState>>,
    request: Result<Json<WebSearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    // An unreadable body carries no query
    let request = match request {
        Ok(Json(request)) => request,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(json_rejection(e, "Empty query"));
        }
        Err(_) => WebSearchRequest::default(),
    };
    let query = request.query.as_deref().unwrap_or("").trim();

    if query.is_empty() {
        return Err(ApiError::bad_request("Empty query"));
    }
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::bad_request("Query too short (min 3 chars)"));
    }

    tracing::info!(query = %query, "Running web search");

    match SearchService::search(&state, query).await {
        Ok(answer) => Ok(Json(SearchResponse::success(answer, query.to_string()))),
        Err(QuizforgeError::EmptyGeneration) => {
            tracing::warn!(query = %query, "Search returned an empty answer");
            Err(ApiError::internal("Empty response from AI"))
        }
        Err(e) => {
            tracing::error!(error = %e, query = %query, "Search failed");
            Err(ApiError::internal("Search failed"))
        }
    }
}
