//! # Gas awareness security
//!
//! Credential and token handling behind the domain ports.
//!
//! This crate provides:
//! - bcrypt password hashing (`BcryptHasher`)
//! - HS256 access tokens with issuer and audience checks (`JwtManager`)
//! - random refresh and email verification tokens

pub mod error;
pub mod jwt;
pub mod password;
pub mod tokens;

pub use error::SecurityError;
pub use jwt::{Claims, JwtManager, JwtSettings};
pub use password::BcryptHasher;
pub use tokens::{generate_refresh_token, generate_verification_token};

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, SecurityError>;
