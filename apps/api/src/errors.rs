use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::schema::ValidationError;
use crate::template::TemplateError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A request or a model reply failed its schema.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The model provider failed or was unreachable.
    #[error("Upstream error: {0}")]
    Upstream(LlmError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Shape(v) => AppError::Validation(v),
            other => AppError::Upstream(other),
        }
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => {
                tracing::warn!("Validation error: {e}");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The AI service could not complete the request".to_string(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
