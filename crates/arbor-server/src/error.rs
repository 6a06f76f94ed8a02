//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from arbor-core errors
impl From<arbor_core::error::ArborError> for ApiError {
    fn from(err: arbor_core::error::ArborError) -> Self {
        use arbor_core::error::ArborError;

        match err {
            ArborError::Schema { message, code } => ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("SCHEMA_VIOLATION_{}", code.as_str()),
                message,
            ),
            ArborError::EmptyGraph => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_GRAPH",
                "the loaded graph has no nodes",
            ),
            ArborError::Validation { message, .. } => ApiError::validation(message),
            ArborError::Configuration(msg) => ApiError::bad_request(msg),
            ArborError::UnsupportedProvider { provider } => {
                ApiError::bad_request(format!("Unsupported provider: {}", provider))
            }
            ArborError::Solver { message, .. } => {
                ApiError::internal(format!("Solver error: {}", message))
            }
            ArborError::Embedding { message, .. } => {
                ApiError::internal(format!("Embedding error: {}", message))
            }
            ArborError::Llm { message, .. } => {
                ApiError::internal(format!("LLM error: {}", message))
            }
            ArborError::Serialization(e) => {
                ApiError::internal(format!("Serialization error: {}", e))
            }
            ArborError::Io(e) => ApiError::internal(format!("IO error: {}", e)),
            ArborError::Internal(msg) => ApiError::internal(msg),
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
