//! Append-only security records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RecordId, UserId};

/// One login attempt, successful or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub id: RecordId,
    pub email: String,
    pub ip_address: Option<String>,
    pub is_successful: bool,
    pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
    pub fn new(email: impl Into<String>, ip_address: Option<String>, is_successful: bool) -> Self {
        Self {
            id: RecordId::new(),
            email: email.into(),
            ip_address,
            is_successful,
            attempted_at: Utc::now(),
        }
    }
}

/// Record of a state-changing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: RecordId,
    pub user_id: Option<UserId>,
    /// HTTP method
    pub action: String,
    /// Request path
    pub entity: String,
    pub meta: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(
        user_id: Option<UserId>,
        action: impl Into<String>,
        entity: impl Into<String>,
        meta: Option<String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            user_id,
            action: action.into(),
            entity: entity.into(),
            meta,
            created_at: Utc::now(),
        }
    }
}
