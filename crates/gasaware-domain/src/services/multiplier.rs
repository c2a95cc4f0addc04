//! Segment multiplier resolution

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::ContentTargetingRule;
use crate::value_objects::{AgeGroup, ModuleType, SubscriptionType};

/// Built-in factors used when no targeting rule matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentMultipliers {
    pub senior: f64,
    pub industrial: f64,
}

impl Default for SegmentMultipliers {
    fn default() -> Self {
        Self {
            senior: 1.2,
            industrial: 1.1,
        }
    }
}

impl SegmentMultipliers {
    /// Age factor times subscription factor
    pub fn default_for(&self, age_group: AgeGroup, subscription: SubscriptionType) -> f64 {
        let age = match age_group {
            AgeGroup::Senior => self.senior,
            _ => 1.0,
        };
        let tier = match subscription {
            SubscriptionType::Endustriyel => self.industrial,
            _ => 1.0,
        };
        age * tier
    }
}

/// Who scored what
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    pub module: ModuleType,
    pub reference_id: Uuid,
    pub age_group: AgeGroup,
    pub subscription: SubscriptionType,
}

/// Pick the multiplier for a context.
///
/// The matching rule with the most constrained dimensions wins, ties going
/// to the most recently created rule. Without a match the defaults apply.
pub fn resolve_multiplier(
    rules: &[ContentTargetingRule],
    context: &ScoringContext,
    defaults: &SegmentMultipliers,
) -> f64 {
    rules
        .iter()
        .filter(|r| {
            r.matches(
                context.module,
                context.reference_id,
                context.age_group,
                context.subscription,
            )
        })
        .max_by_key(|r| (r.specificity(), r.created_at))
        .map(|r| r.score_multiplier)
        .unwrap_or_else(|| defaults.default_for(context.age_group, context.subscription))
}
