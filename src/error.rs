// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::services::controller::{ControllerError, GENERATION_FAILED_MESSAGE};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (a generation is already pending)
    Conflict(String),

    // 502 Bad Gateway; the cause has already been logged
    GenerationFailed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::GenerationFailed => (
                StatusCode::BAD_GATEWAY,
                GENERATION_FAILED_MESSAGE.to_string(),
            ),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` on controller transitions inside handlers.
impl From<ControllerError> for AppError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::MissingSubject => AppError::BadRequest(err.to_string()),
            ControllerError::AlreadyGenerating => AppError::Conflict(err.to_string()),
            ControllerError::NoPaper => AppError::NotFound(err.to_string()),
            ControllerError::InvalidEdit(_) => AppError::BadRequest(err.to_string()),
        }
    }
}
