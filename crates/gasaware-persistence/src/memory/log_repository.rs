//! In-memory login attempt and audit log repositories

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use gasaware_domain::{
    entities::{normalize_email, AuditLog, LoginAttempt},
    errors::DomainResult,
    repositories::{AuditLogRepository, LoginAttemptRepository},
};

#[derive(Debug, Default)]
pub struct InMemoryLoginAttemptRepository {
    attempts: RwLock<Vec<LoginAttempt>>,
}

impl InMemoryLoginAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoginAttemptRepository for InMemoryLoginAttemptRepository {
    async fn record(&self, attempt: &LoginAttempt) -> DomainResult<()> {
        let mut stored = attempt.clone();
        stored.email = normalize_email(&stored.email);
        self.attempts.write().push(stored);
        Ok(())
    }

    async fn count_failures_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
    ) -> DomainResult<usize> {
        let email = normalize_email(email);
        Ok(self
            .attempts
            .read()
            .iter()
            .filter(|a| !a.is_successful && a.email == email && a.attempted_at >= since)
            .count())
    }
}

/// Append-only audit trail
#[derive(Debug, Default)]
pub struct InMemoryAuditLogRepository {
    entries: RwLock<Vec<AuditLog>>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, entry: &AuditLog) -> DomainResult<()> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> DomainResult<Vec<AuditLog>> {
        Ok(self
            .entries
            .read()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
