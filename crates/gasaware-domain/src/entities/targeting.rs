//! Admin-managed content targeting rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identified;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AgeGroup, ModuleType, RuleId, SubscriptionType};

/// Largest multiplier a rule may carry
pub const MAX_MULTIPLIER: f64 = 10.0;

/// Editable fields of a targeting rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TargetingRuleDraft {
    pub module: ModuleType,
    #[serde(default)]
    pub reference_id: Option<Uuid>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub subscription_type: Option<SubscriptionType>,
    #[serde(default = "default_multiplier")]
    pub score_multiplier: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub description: String,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_active() -> bool {
    true
}

impl TargetingRuleDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.score_multiplier.is_finite()
            || self.score_multiplier <= 0.0
            || self.score_multiplier > MAX_MULTIPLIER
        {
            return Err(DomainError::validation(
                "score_multiplier",
                format!("must be in (0, {MAX_MULTIPLIER}]"),
            ));
        }
        Ok(())
    }
}

/// Segment-specific score multiplier. Unset dimensions match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTargetingRule {
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

impl ContentTargetingRule {
    pub fn create(draft: TargetingRuleDraft) -> DomainResult<Self> {
        draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: RuleId::new(),
            module: draft.module,
            reference_id: draft.reference_id,
            age_group: draft.age_group,
            subscription_type: draft.subscription_type,
            score_multiplier: draft.score_multiplier,
            is_active: draft.is_active,
            description: draft.description,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, draft: TargetingRuleDraft) -> DomainResult<()> {
        draft.validate()?;
        self.module = draft.module;
        self.reference_id = draft.reference_id;
        self.age_group = draft.age_group;
        self.subscription_type = draft.subscription_type;
        self.score_multiplier = draft.score_multiplier;
        self.is_active = draft.is_active;
        self.description = draft.description;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether this active rule applies to the given scoring context
    pub fn matches(
        &self,
        module: ModuleType,
        reference_id: Uuid,
        age_group: AgeGroup,
        subscription_type: SubscriptionType,
    ) -> bool {
        self.is_active
            && self.module == module
            && self.reference_id.map_or(true, |r| r == reference_id)
            && self.age_group.map_or(true, |a| a == age_group)
            && self.subscription_type.map_or(true, |s| s == subscription_type)
    }

    /// Number of constrained dimensions
    pub fn specificity(&self) -> usize {
        usize::from(self.reference_id.is_some())
            + usize::from(self.age_group.is_some())
            + usize::from(self.subscription_type.is_some())
    }
}

impl Identified for ContentTargetingRule {
    type Id = RuleId;

    fn id(&self) -> RuleId {
        self.id
    }
}
