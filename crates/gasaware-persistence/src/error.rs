//! Persistence layer error types
//!
//! Error mapping to domain types

use gasaware_domain::errors::DomainError;
use thiserror::Error;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Unique key already held by another entity
    #[error("Duplicate key: {entity_type} with {key}")]
    DuplicateKey {
        entity_type: &'static str,
        key: String,
    },
}

impl PersistenceError {
    /// Create a duplicate key error
    pub fn duplicate(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity_type,
            key: key.into(),
        }
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DuplicateKey { entity_type, key } => DomainError::DuplicateEntity {
                entity_type: entity_type.to_string(),
                key,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_error() {
        let err = PersistenceError::duplicate("User", "email a@b.co");
        assert!(err.to_string().contains("User"));
        assert!(err.to_string().contains("a@b.co"));
    }

    #[test]
    fn test_error_conversion() {
        let domain_err: DomainError = PersistenceError::duplicate("User", "x").into();
        assert!(matches!(domain_err, DomainError::DuplicateEntity { .. }));
    }
}
