//! bcrypt password hashing

use gasaware_domain::{errors::DomainResult, ports::PasswordHasher};

use crate::error::SecurityError;

/// Work factor used when none is configured
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| SecurityError::from(e).into())
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| SecurityError::from(e).into())
    }
}
