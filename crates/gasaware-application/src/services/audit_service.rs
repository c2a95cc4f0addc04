//! Audit trail of state-changing requests

use std::sync::Arc;

use gasaware_domain::entities::AuditLog;
use gasaware_domain::repositories::AuditLogRepository;
use gasaware_domain::value_objects::UserId;

use crate::dto::AuditLogDto;
use crate::errors::ApplicationResult;

/// Entries returned when no limit is given
pub const DEFAULT_AUDIT_LIMIT: usize = 100;
/// Upper bound on entries returned at once
pub const MAX_AUDIT_LIMIT: usize = 1000;

pub struct AuditService {
    logs: Arc<dyn AuditLogRepository>,
}

impl AuditService {
    pub fn new(logs: Arc<dyn AuditLogRepository>) -> Self {
        Self { logs }
    }

    pub async fn record(
        &self,
        user_id: Option<UserId>,
        action: &str,
        entity: &str,
        meta: Option<String>,
    ) -> ApplicationResult<()> {
        self.logs
            .append(&AuditLog::new(user_id, action, entity, meta))
            .await?;
        Ok(())
    }

    /// Most recent entries first. `limit` is clamped to `1..=MAX_AUDIT_LIMIT`.
    pub async fn recent(&self, limit: Option<usize>) -> ApplicationResult<Vec<AuditLogDto>> {
        let limit = limit.unwrap_or(DEFAULT_AUDIT_LIMIT).clamp(1, MAX_AUDIT_LIMIT);
        let entries = self.logs.recent(limit).await?;
        Ok(entries.iter().map(AuditLogDto::from_domain).collect())
    }
}
