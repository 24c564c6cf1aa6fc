use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::dto::{EvaluateAnswerRequest, EvaluationFailure};
use super::json_rejection;
use crate::error::ApiError;
use crate::services::EvaluationService;
use crate::state::AppState;

pub async fn evaluate_answer(
    State(state): State<Arc<AppState>>,
    request: Result<Json<EvaluateAnswerRequest>, JsonRejection>,
) -> Response {
    const MISSING: &str = "Missing required fields";

    let request = match request {
        Ok(Json(request)) => request,
        Err(e) => return json_rejection(e, MISSING).into_response(),
    };
    let Some((student_answer, model_answer)) = request.answers() else {
        return ApiError::bad_request(MISSING).into_response();
    };

    tracing::info!(
        student_chars = student_answer.chars().count(),
        model_chars = model_answer.chars().count(),
        "Evaluating answer"
    );

    match EvaluationService::evaluate(&state, student_answer, model_answer).await {
        Ok(evaluation) => Json(evaluation).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Evaluation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EvaluationFailure::new(e.to_string())),
            )
                .into_response()
        }
    }
}
