use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::protocol::STATUS_ERROR;

/// Store-side error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
/// Messages are shown to the user as-is, so they read as sentences.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("File too large (limit {0} bytes)")]
    PayloadTooLarge(usize),

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid upload: {}", .0.body_text())]
    MultipartRequest(#[from] MultipartRejection),

    #[error("Invalid request body: {}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Multipart(e) => e.status(),
            AppError::MultipartRequest(e) => e.status(),
            AppError::Json(e) => e.status(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if !matches!(self, AppError::Internal(_)) {
            tracing::warn!(%status, "request rejected: {}", self);
        }

        let body = Json(json!({
            "status": STATUS_ERROR,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
