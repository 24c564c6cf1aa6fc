use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let storage = state.thread_store.backend_name();

    state.thread_store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, storage = storage, "Storage health check failed");
        ApiError::service_unavailable("Storage unavailable")
    })?;

    Ok(Json(HealthResponse::ok(storage)))
}
