//! Score recording
//!
//! Resolves the segment multiplier for the scoring user, caps the final
//! score and persists the attempt together with its score row.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gasaware_domain::entities::{Attempt, ContentTargetingRule, Score};
use gasaware_domain::repositories::{AttemptRepository, Repository, UserRepository};
use gasaware_domain::services::{
    apply_multiplier, resolve_multiplier, ScoringContext, SegmentMultipliers,
};
use gasaware_domain::value_objects::{ModuleType, RuleId, UserId};

use crate::dto::ScoreDto;
use crate::errors::{ApplicationError, ApplicationResult};

pub struct ScoringService {
    users: Arc<dyn UserRepository>,
    rules: Arc<dyn Repository<ContentTargetingRule, RuleId>>,
    attempts: Arc<dyn AttemptRepository>,
    defaults: SegmentMultipliers,
}

impl ScoringService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        rules: Arc<dyn Repository<ContentTargetingRule, RuleId>>,
        attempts: Arc<dyn AttemptRepository>,
        defaults: SegmentMultipliers,
    ) -> Self {
        Self {
            users,
            rules,
            attempts,
            defaults,
        }
    }

    /// Multiplier that applies to `user_id` scoring on `reference_id`
    pub async fn multiplier_for(
        &self,
        user_id: &UserId,
        module: ModuleType,
        reference_id: Uuid,
    ) -> ApplicationResult<f64> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", user_id))?;
        let rules = self.rules.find_all().await?;

        let context = ScoringContext {
            module,
            reference_id,
            age_group: user.age_group(),
            subscription: user.subscription_type(),
        };
        Ok(resolve_multiplier(&rules, &context, &self.defaults))
    }

    /// Apply the multiplier to `raw_score` and persist the attempt
    pub async fn record(
        &self,
        user_id: &UserId,
        module: ModuleType,
        reference_id: Uuid,
        raw_score: f64,
    ) -> ApplicationResult<Score> {
        let multiplier = self.multiplier_for(user_id, module, reference_id).await?;
        self.record_with(user_id, module, reference_id, raw_score, multiplier)
            .await
    }

    /// Persist an attempt scored with an already resolved multiplier
    pub async fn record_with(
        &self,
        user_id: &UserId,
        module: ModuleType,
        reference_id: Uuid,
        raw_score: f64,
        multiplier: f64,
    ) -> ApplicationResult<Score> {
        let final_score = apply_multiplier(raw_score, multiplier);

        let attempt = Attempt::completed(*user_id, module, reference_id, final_score);
        let score = Score::for_attempt(&attempt, raw_score, multiplier);
        self.attempts.record(&attempt, &score).await?;

        info!(
            user_id = %user_id,
            module = ?module,
            reference_id = %reference_id,
            raw_score,
            multiplier,
            final_score,
            "Recorded score"
        );
        Ok(score)
    }

    /// Scores of one user, newest first
    pub async fn scores_for(&self, user_id: &UserId) -> ApplicationResult<Vec<ScoreDto>> {
        let scores = self.attempts.scores_for_user(user_id).await?;
        Ok(scores.iter().map(ScoreDto::from_domain).collect())
    }
}
