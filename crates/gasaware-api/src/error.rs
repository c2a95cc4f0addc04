//! API error types and handling

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use gasaware_application::ApplicationError;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid input
    #[error("{0}")]
    BadRequest(String),

    /// Correct credentials on an unverified account
    #[error("{0}")]
    EmailNotVerified(String),

    /// Missing, invalid or expired credentials
    #[error("{0}")]
    Authentication(String),

    /// Authenticated but not allowed
    #[error("{0}")]
    Authorization(String),

    /// Unknown resource
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Login lockout or rate limit; carries the suggested retry delay
    #[error("{message}")]
    TooManyRequests {
        /// Client-facing explanation
        message: String,
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Anything else; the detail is logged, never returned
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let message = err.to_string();
        match err {
            ApplicationError::ValidationFailed(_) => ApiError::BadRequest(message),
            ApplicationError::EmailNotVerified => ApiError::EmailNotVerified(message),
            ApplicationError::Unauthorized(_) => ApiError::Authentication(message),
            ApplicationError::TooManyAttempts {
                retry_after_minutes,
            } => ApiError::TooManyRequests {
                message,
                retry_after_secs: u64::from(retry_after_minutes) * 60,
            },
            ApplicationError::NotFound { .. } => ApiError::NotFound(message),
            ApplicationError::Conflict(_) => ApiError::Conflict(message),
            ApplicationError::ExternalServiceFailed(_) => ApiError::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::EmailNotVerified(_) => (StatusCode::BAD_REQUEST, "email_not_verified"),
            ApiError::Authentication(_) => (StatusCode::UNAUTHORIZED, "authentication_error"),
            ApiError::Authorization(_) => (StatusCode::FORBIDDEN, "authorization_error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::TooManyRequests { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "too_many_requests")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = match &self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let mut body = json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        });
        if matches!(self, ApiError::EmailNotVerified(_)) {
            body["emailNotVerified"] = json!(true);
        }

        let mut response = (status, Json(body)).into_response();
        if let ApiError::TooManyRequests {
            retry_after_secs, ..
        } = self
        {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
