//! In-memory survey response repository

use async_trait::async_trait;
use parking_lot::RwLock;

use gasaware_domain::{
    entities::SurveyResponse, errors::DomainResult, repositories::SurveyResponseRepository,
    value_objects::SurveyId,
};

#[derive(Debug, Default)]
pub struct InMemorySurveyResponseRepository {
    responses: RwLock<Vec<SurveyResponse>>,
}

impl InMemorySurveyResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyResponseRepository for InMemorySurveyResponseRepository {
    async fn save_all(&self, responses: &[SurveyResponse]) -> DomainResult<()> {
        self.responses.write().extend_from_slice(responses);
        Ok(())
    }

    async fn find_by_survey(&self, survey_id: &SurveyId) -> DomainResult<Vec<SurveyResponse>> {
        Ok(self
            .responses
            .read()
            .iter()
            .filter(|r| r.survey_id == *survey_id)
            .cloned()
            .collect())
    }
}
