//! Scores, targeting rules, reports and audit entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gasaware_domain::entities::{AuditLog, ContentTargetingRule, Score};
use gasaware_domain::value_objects::{
    AgeGroup, AttemptId, ModuleType, RecordId, RuleId, ScoreId, SubscriptionType, UserId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ScoreDto {
    pub id: ScoreId,
    pub attempt_id: AttemptId,
    pub module: ModuleType,
    pub reference_id: Uuid,
    pub raw_score: f64,
    pub segment_multiplier: f64,
    pub final_score: f64,
    pub created_at: DateTime<Utc>,
}

impl ScoreDto {
    pub fn from_domain(score: &Score) -> Self {
        Self {
            id: score.id,
            attempt_id: score.attempt_id,
            module: score.module,
            reference_id: score.reference_id,
            raw_score: score.raw_score,
            segment_multiplier: score.segment_multiplier,
            final_score: score.final_score,
            created_at: score.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TargetingRuleDto {
    pub id: RuleId,
    pub module: ModuleType,
    pub reference_id: Option<Uuid>,
    pub age_group: Option<AgeGroup>,
    pub subscription_type: Option<SubscriptionType>,
    pub score_multiplier: f64,
    pub is_active: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TargetingRuleDto {
    pub fn from_domain(rule: &ContentTargetingRule) -> Self {
        Self {
            id: rule.id,
            module: rule.module,
            reference_id: rule.reference_id,
            age_group: rule.age_group,
            subscription_type: rule.subscription_type,
            score_multiplier: rule.score_multiplier,
            is_active: rule.is_active,
            description: rule.description.clone(),
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

/// Usage figures of one age group or subscription tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub segment: String,
    pub user_count: usize,
    pub attempt_count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryDto {
    pub total_users: usize,
    pub total_attempts: usize,
    /// Mean final score over scored attempts, 0 when there are none
    pub average_score: f64,
    pub by_age_group: Vec<SegmentStats>,
    pub by_subscription: Vec<SegmentStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuditLogDto {
    pub id: RecordId,
    pub user_id: Option<UserId>,
    pub action: String,
    pub entity: String,
    pub meta: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogDto {
    pub fn from_domain(entry: &AuditLog) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            action: entry.action.clone(),
            entity: entry.entity.clone(),
            meta: entry.meta.clone(),
            created_at: entry.created_at,
        }
    }
}
