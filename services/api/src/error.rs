//! Custom error types for the API service
//!
//! Every handler-local failure is normalized into [`ApiError`] before it
//! reaches the client; each variant renders as a JSON `{message}` body with
//! the matching HTTP status. The `From<sqlx::Error>` impl is the single
//! classification point mapping store-level failures into the taxonomy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input, or a schema violation (400)
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials or token (401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not authorized for the target resource (403)
    #[error("{0}")]
    Forbidden(String),

    /// Referenced resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (409)
    #[error("{0}")]
    Conflict(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Internal server error (500)
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    /// HTTP status code for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        if common::error::is_unique_violation(&error) {
            return ApiError::Conflict("User with this email is already registered".to_string());
        }

        match error {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failure detail stays in the logs.
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            ApiError::InternalServerError => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
