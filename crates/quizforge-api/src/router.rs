use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>, config: &ApiConfig) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Generation
        .route("/process-pdf", post(handlers::process_pdf))
        .route("/evaluate-answer", post(handlers::evaluate_answer))
        .route("/web-search", post(handlers::web_search))

        // Discussion threads
        .route("/threads", get(handlers::list_threads).post(handlers::create_thread))
        .route("/threads/{thread_id}", get(handlers::get_thread).delete(handlers::delete_thread))
        .route("/threads/{thread_id}/messages", post(handlers::add_message))
        .route(
            "/threads/{thread_id}/messages/{message_id}/report",
            post(handlers::report_message),
        )

        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
