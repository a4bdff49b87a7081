use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ErrorList;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The body parsed as JSON but is not an object, so there is nothing to validate.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Export refuses to produce a document from invalid data.
    #[error("Export blocked: {0}")]
    ExportBlocked(ErrorList),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::ExportBlocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Render(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::MalformedPayload(msg) => json!({
                "error": {
                    "code": "MALFORMED_PAYLOAD",
                    "message": msg
                }
            }),
            AppError::ExportBlocked(errors) => json!({
                "error": {
                    "code": "EXPORT_BLOCKED",
                    "message": "Validation failed - export blocked",
                    "errors": errors
                }
            }),
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                json!({
                    "error": {
                        "code": "RENDER_ERROR",
                        "message": "The document could not be rendered"
                    }
                })
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                json!({
                    "error": {
                        "code": "INTERNAL_ERROR",
                        "message": "An internal server error occurred"
                    }
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
