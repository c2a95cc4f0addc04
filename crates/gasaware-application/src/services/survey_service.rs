//! Survey catalog, authoring and weighted response scoring

use std::sync::Arc;

use tracing::info;

use gasaware_domain::entities::{Survey, SurveyDraft, SurveyResponse};
use gasaware_domain::repositories::{Repository, SurveyResponseRepository};
use gasaware_domain::services::{score_survey, ContentFilter};
use gasaware_domain::value_objects::{ModuleType, SurveyId, UserId};

use crate::dto::{SurveyDetailDto, SurveyResultDto, SurveySubmission, SurveySummaryDto};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::services::ScoringService;

const SUBMITTED_MESSAGE: &str = "Your responses have been recorded";

pub struct SurveyService {
    surveys: Arc<dyn Repository<Survey, SurveyId>>,
    responses: Arc<dyn SurveyResponseRepository>,
    scoring: Arc<ScoringService>,
}

impl SurveyService {
    pub fn new(
        surveys: Arc<dyn Repository<Survey, SurveyId>>,
        responses: Arc<dyn SurveyResponseRepository>,
        scoring: Arc<ScoringService>,
    ) -> Self {
        Self {
            surveys,
            responses,
            scoring,
        }
    }

    /// Active surveys. A non-empty filter keeps only surveys with at least
    /// one question aimed at that segment.
    pub async fn list_active(
        &self,
        filter: ContentFilter,
    ) -> ApplicationResult<Vec<SurveySummaryDto>> {
        let mut surveys: Vec<Survey> = self
            .surveys
            .find_all()
            .await?
            .into_iter()
            .filter(|s| s.is_active && filter.admits_survey(s))
            .collect();
        surveys.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(surveys.iter().map(SurveySummaryDto::from_domain).collect())
    }

    /// Respondent view of one survey
    pub async fn get(&self, id: &SurveyId) -> ApplicationResult<SurveyDetailDto> {
        Ok(SurveyDetailDto::public(&self.load(id).await?))
    }

    /// Store the answers, score them and persist the attempt
    pub async fn submit(
        &self,
        user_id: &UserId,
        id: &SurveyId,
        submission: SurveySubmission,
    ) -> ApplicationResult<SurveyResultDto> {
        let survey = self.load(id).await?;
        if !survey.is_active {
            return Err(ApplicationError::ValidationFailed(
                "survey is not accepting responses".to_string(),
            ));
        }

        let outcome = score_survey(&survey, &submission.answers)?;
        let multiplier = self
            .scoring
            .multiplier_for(user_id, ModuleType::Survey, id.as_uuid())
            .await?;

        let responses: Vec<SurveyResponse> = outcome
            .accepted
            .iter()
            .map(|a| {
                SurveyResponse::new(
                    survey.id,
                    *user_id,
                    a.question_id,
                    a.selected_option_id,
                    a.numeric_value,
                )
            })
            .collect();
        self.responses.save_all(&responses).await?;

        let score = self
            .scoring
            .record_with(
                user_id,
                ModuleType::Survey,
                id.as_uuid(),
                outcome.raw_score,
                multiplier,
            )
            .await?;

        Ok(SurveyResultDto {
            message: SUBMITTED_MESSAGE.to_string(),
            attempt_id: score.attempt_id,
            score: score.final_score,
            raw_score: score.raw_score,
            segment_multiplier: score.segment_multiplier,
            answered_count: responses.len(),
        })
    }

    pub async fn create(&self, draft: SurveyDraft) -> ApplicationResult<SurveyDetailDto> {
        let survey = Survey::create(draft)?;
        self.surveys.save(&survey).await?;
        info!(survey_id = %survey.id, questions = survey.questions.len(), "Created survey");
        Ok(SurveyDetailDto::authoring(&survey))
    }

    /// Replace metadata and the whole question set
    pub async fn update(
        &self,
        id: &SurveyId,
        draft: SurveyDraft,
    ) -> ApplicationResult<SurveyDetailDto> {
        let mut survey = self.load(id).await?;
        survey.replace(draft)?;
        self.surveys.save(&survey).await?;
        Ok(SurveyDetailDto::authoring(&survey))
    }

    pub async fn delete(&self, id: &SurveyId) -> ApplicationResult<()> {
        if !self.surveys.delete(id).await? {
            return Err(ApplicationError::not_found("Survey", id));
        }
        info!(survey_id = %id, "Deleted survey");
        Ok(())
    }

    async fn load(&self, id: &SurveyId) -> ApplicationResult<Survey> {
        self.surveys
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Survey", id))
    }
}
