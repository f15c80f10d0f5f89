pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::document::handlers as document;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis/modes", get(analysis::handle_list_modes))
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        // Document API
        .route(
            "/api/v1/documents/metrics",
            post(document::handle_document_metrics),
        )
        .layer(upload_limit)
        .with_state(state)
}
