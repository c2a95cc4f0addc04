//! Port interfaces for external services
//!
//! Ports define the contracts for credential hashing, token issuance and
//! outgoing mail. They are implemented by infrastructure crates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::errors::DomainResult;
use crate::value_objects::{UserId, UserRole};

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Whether `password` matches `hash`. Malformed hashes are errors.
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}

/// Signed access token with its expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Access token issuance and opaque token generation
pub trait TokenIssuer: Send + Sync {
    fn issue_access_token(&self, user: &User) -> DomainResult<IssuedToken>;

    /// Check signature, issuer, audience and expiry
    fn verify_access_token(&self, token: &str) -> DomainResult<TokenSubject>;

    /// Random refresh token
    fn new_refresh_token(&self) -> String;

    /// Random URL-safe email verification token
    fn new_verification_token(&self) -> String;
}

/// Outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> DomainResult<()>;
}
