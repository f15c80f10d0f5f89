use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::{AnalysisError, ValidationError};
use crate::document::ExtractionError;
use crate::llm_client::BackendError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed upload: {0}")]
    Upload(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::Validation(e) => AppError::Validation(e),
            AnalysisError::Extraction(e) => AppError::Extraction(e),
            AnalysisError::Backend(e) => AppError::Backend(e),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(error: MultipartError) -> Self {
        AppError::Upload(error.body_text())
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Upload(_) => (StatusCode::BAD_REQUEST, "UPLOAD_ERROR"),
            AppError::Extraction(ExtractionError::Interrupted(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "EXTRACTION_INTERRUPTED")
            }
            AppError::Extraction(ExtractionError::EmptyDocument) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_DOCUMENT")
            }
            AppError::Extraction(ExtractionError::Unreadable(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNREADABLE_DOCUMENT")
            }
            AppError::Backend(e) => match e {
                BackendError::Authentication(_) => (StatusCode::UNAUTHORIZED, "INVALID_API_KEY"),
                BackendError::QuotaExceeded(_) => (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED"),
                BackendError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "BACKEND_TIMEOUT"),
                BackendError::Blocked(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CONTENT_BLOCKED"),
                BackendError::Rejected(_) => (StatusCode::BAD_GATEWAY, "BACKEND_REJECTED"),
                BackendError::Unavailable(_) => (StatusCode::BAD_GATEWAY, "BACKEND_UNAVAILABLE"),
                BackendError::MalformedResponse(_) => {
                    (StatusCode::BAD_GATEWAY, "BACKEND_BAD_RESPONSE")
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(e) => e.to_string(),
            AppError::Upload(msg) => msg.clone(),
            AppError::Extraction(e) => {
                if status.is_server_error() {
                    tracing::error!("Extraction error: {e}");
                }
                e.to_string()
            }
            AppError::Backend(e) => {
                tracing::warn!("Backend error: {e}");
                e.to_string()
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let AppError::Validation(e) = &self {
            error["field"] = json!(e.field());
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
