use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::error::InterviewError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Interview(#[from] InterviewError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = matches!(&self, AppError::Interview(e) if e.is_retryable());

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Interview(e) => interview_error_parts(e),
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
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}

fn interview_error_parts(e: &InterviewError) -> (StatusCode, &'static str, String) {
    match e {
        InterviewError::Config(_) => (StatusCode::BAD_REQUEST, "CONFIG_ERROR", e.to_string()),
        InterviewError::EmptyAnswer => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
        InterviewError::IllegalTransition { .. } => {
            (StatusCode::CONFLICT, "ILLEGAL_TRANSITION", e.to_string())
        }
        InterviewError::Capacity { .. } => {
            tracing::error!("Capacity error reached the API: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CAPACITY_ERROR",
                e.to_string(),
            )
        }
        InterviewError::RetryableGateway { .. } => {
            tracing::warn!("Gateway error: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "GATEWAY_UNAVAILABLE",
                "The AI service is temporarily unavailable. Please try again.".to_string(),
            )
        }
        InterviewError::MalformedResponse { .. } => {
            tracing::warn!("Malformed gateway response: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                "The AI service returned an unexpected response. Please try again.".to_string(),
            )
        }
    }
}
