//! Application layer error types
//!
//! These errors represent use-case failures suitable for API consumption.
//! Domain errors are folded into them with `From`.

use gasaware_domain::DomainError;
use thiserror::Error;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    // === Validation Errors ===
    /// Input validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    // === Authentication Errors ===
    /// Missing, invalid or expired credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Correct credentials on an account whose email is not verified
    #[error("Email address has not been verified")]
    EmailNotVerified,

    /// Login locked out after repeated failures
    #[error("Too many failed login attempts, retry in {retry_after_minutes} minutes")]
    TooManyAttempts { retry_after_minutes: u32 },

    // === Lookup Errors ===
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    // === Infrastructure Errors ===
    /// Hashing, signing or mail delivery failed
    #[error("External service failed: {0}")]
    ExternalServiceFailed(String),
}

impl ApplicationError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError { field, reason } => {
                ApplicationError::ValidationFailed(format!("{field}: {reason}"))
            }
            DomainError::EntityNotFound { entity_type, id } => ApplicationError::NotFound {
                entity: entity_type,
                id,
            },
            DomainError::DuplicateEntity { entity_type, key } => {
                ApplicationError::Conflict(format!("{entity_type} already exists: {key}"))
            }
            DomainError::InvalidToken { reason } => ApplicationError::Unauthorized(reason),
            DomainError::ExternalService { service, reason } => {
                ApplicationError::ExternalServiceFailed(format!("{service}: {reason}"))
            }
        }
    }
}
