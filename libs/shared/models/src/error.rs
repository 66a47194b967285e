use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    ValidationError { message: String, details: Option<Value> },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError { message: message.into(), details: None }
    }

    pub fn validation_with_details(message: impl Into<String>, details: Value) -> Self {
        AppError::ValidationError { message: message.into(), details: Some(details) }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, details) = match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Unprocessable(msg) => (msg, None),
            AppError::ValidationError { message, details } => (message, details),
        };

        tracing::error!("Error: {}: {}", status, message);

        let body = match details {
            Some(details) => Json(json!({
                "error": message,
                "details": details
            })),
            None => Json(json!({
                "error": message
            })),
        };

        (status, body).into_response()
    }
}
