//! HTTP error handling and response types.
//!
//! Validation failures travel to the client verbatim with status 400.
//! Storage and unexpected failures are logged and masked behind a generic
//! 500 so internals never leak into responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::query::InvalidInput;
use crate::services::ServiceError;

/// API error response body.
///
/// `code` repeats the HTTP status so clients reading the body alone can
/// branch on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code
    pub code: u16,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Resource not found
    NotFound(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Repository(err) => {
                tracing::error!("repository error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiError::new(status, message))).into_response()
    }
}

impl From<InvalidInput> for AppError {
    fn from(err: InvalidInput) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(e) => e.into(),
            ServiceError::Repository(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_travels_verbatim() {
        let err = AppError::from(InvalidInput::PageInvalid);
        match err {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "\"page\" must be positive integer")
            }
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_error_body_shape() {
        let body = ApiError::new(StatusCode::BAD_REQUEST, "\"status\" must be 0 or 1");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 400);
        assert_eq!(json["message"], "\"status\" must be 0 or 1");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_error_body_data_field() {
        let body = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            .with_data(serde_json::json!({"hint": "retry later"}));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"]["hint"], "retry later");
    }
}
