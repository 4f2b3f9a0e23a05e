//! HTTP error mapping for API handlers.

use crate::AppError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error returned by JSON API handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum HttpError {
    App(AppError),
    /// Request body could not be read or parsed.
    Body(StatusCode, String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; every other parse failure is bad input.
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::Body(status, rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::App(AppError::NotFound) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            HttpError::App(AppError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
            HttpError::App(err) => {
                tracing::error!("Storage failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database error".to_string(),
                )
            }
            HttpError::Body(status, message) => {
                tracing::debug!("Rejected request body: {}", message);
                (status, message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
