//! Security-related error types

use gasaware_domain::errors::DomainError;
use thiserror::Error;

/// Security operation errors
#[derive(Error, Debug)]
pub enum SecurityError {
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid claim: {message}")]
    InvalidClaim { message: String },
}

impl From<SecurityError> for DomainError {
    fn from(err: SecurityError) -> Self {
        match err {
            SecurityError::Hashing(e) => DomainError::external("bcrypt", e),
            SecurityError::Token(e) => DomainError::InvalidToken {
                reason: e.to_string(),
            },
            SecurityError::InvalidClaim { message } => {
                DomainError::InvalidToken { reason: message }
            }
        }
    }
}
