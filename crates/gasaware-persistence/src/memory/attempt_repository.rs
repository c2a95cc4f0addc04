//! In-memory attempt and score repository

use async_trait::async_trait;
use parking_lot::RwLock;

use gasaware_domain::{
    entities::{Attempt, Score},
    errors::DomainResult,
    repositories::AttemptRepository,
    value_objects::UserId,
};

/// Attempts stored next to their score rows
#[derive(Debug, Default)]
pub struct InMemoryAttemptRepository {
    rows: RwLock<Vec<(Attempt, Score)>>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn record(&self, attempt: &Attempt, score: &Score) -> DomainResult<()> {
        self.rows.write().push((attempt.clone(), score.clone()));
        Ok(())
    }

    async fn find_all_attempts(&self) -> DomainResult<Vec<Attempt>> {
        Ok(self.rows.read().iter().map(|(a, _)| a.clone()).collect())
    }

    async fn scores_for_user(&self, user_id: &UserId) -> DomainResult<Vec<Score>> {
        let mut scores: Vec<Score> = self
            .rows
            .read()
            .iter()
            .filter(|(_, s)| s.user_id == *user_id)
            .map(|(_, s)| s.clone())
            .collect();
        scores.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(scores)
    }
}
