//! Domain errors

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Duplicate entity: {entity_type} with {key}")]
    DuplicateEntity { entity_type: String, key: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("External service failure: {service} - {reason}")]
    ExternalService { service: String, reason: String },
}

impl DomainError {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a missing entity
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::EntityNotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a failing port adapter
    pub fn external(service: impl Into<String>, reason: impl ToString) -> Self {
        Self::ExternalService {
            service: service.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
