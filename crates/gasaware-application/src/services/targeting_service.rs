//! Admin management of content targeting rules

use std::sync::Arc;

use tracing::info;

use gasaware_domain::entities::{ContentTargetingRule, TargetingRuleDraft};
use gasaware_domain::repositories::Repository;
use gasaware_domain::value_objects::RuleId;

use crate::dto::TargetingRuleDto;
use crate::errors::{ApplicationError, ApplicationResult};

pub struct TargetingRuleService {
    rules: Arc<dyn Repository<ContentTargetingRule, RuleId>>,
}

impl TargetingRuleService {
    pub fn new(rules: Arc<dyn Repository<ContentTargetingRule, RuleId>>) -> Self {
        Self { rules }
    }

    /// All rules, newest first
    pub async fn list(&self) -> ApplicationResult<Vec<TargetingRuleDto>> {
        let mut rules = self.rules.find_all().await?;
        rules.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rules.iter().map(TargetingRuleDto::from_domain).collect())
    }

    pub async fn get(&self, id: &RuleId) -> ApplicationResult<TargetingRuleDto> {
        Ok(TargetingRuleDto::from_domain(&self.load(id).await?))
    }

    pub async fn create(&self, draft: TargetingRuleDraft) -> ApplicationResult<TargetingRuleDto> {
        let rule = ContentTargetingRule::create(draft)?;
        self.rules.save(&rule).await?;
        info!(
            rule_id = %rule.id,
            module = ?rule.module,
            multiplier = rule.score_multiplier,
            "Created targeting rule"
        );
        Ok(TargetingRuleDto::from_domain(&rule))
    }

    pub async fn update(
        &self,
        id: &RuleId,
        draft: TargetingRuleDraft,
    ) -> ApplicationResult<TargetingRuleDto> {
        let mut rule = self.load(id).await?;
        rule.apply(draft)?;
        self.rules.save(&rule).await?;
        Ok(TargetingRuleDto::from_domain(&rule))
    }

    pub async fn delete(&self, id: &RuleId) -> ApplicationResult<()> {
        if !self.rules.delete(id).await? {
            return Err(ApplicationError::not_found("ContentTargetingRule", id));
        }
        Ok(())
    }

    async fn load(&self, id: &RuleId) -> ApplicationResult<ContentTargetingRule> {
        self.rules
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("ContentTargetingRule", id))
    }
}
