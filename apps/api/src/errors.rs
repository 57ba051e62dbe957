use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::stroke_client::StrokeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Stroke service unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StrokeError> for AppError {
    fn from(err: StrokeError) -> Self {
        match err {
            StrokeError::Unavailable(msg) => AppError::OracleUnavailable(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UserNotFound(id) => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                format!("User {id} does not exist"),
            ),
            AppError::OracleUnavailable(msg) => {
                tracing::error!("Stroke service unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "ORACLE_UNAVAILABLE",
                    "The stroke-counting service is unavailable".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
