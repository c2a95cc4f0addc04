//! Scored attempts and raw survey responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Identified;
use crate::value_objects::{
    AttemptId, ModuleType, OptionId, QuestionId, RecordId, ScoreId, SurveyId, UserId,
};

/// One completed run of a simulation or survey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: AttemptId,
    pub user_id: UserId,
    pub module: ModuleType,
    /// Id of the simulation or survey
    pub reference_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub score: Option<f64>,
}

impl Attempt {
    /// Attempt started and finished now with a final score
    pub fn completed(user_id: UserId, module: ModuleType, reference_id: Uuid, score: f64) -> Self {
        let now = Utc::now();
        Self {
            id: AttemptId::new(),
            user_id,
            module,
            reference_id,
            started_at: now,
            finished_at: Some(now),
            score: Some(score),
        }
    }
}

impl Identified for Attempt {
    type Id = AttemptId;

    fn id(&self) -> AttemptId {
        self.id
    }
}

/// Score breakdown of an attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: ScoreId,
    pub user_id: UserId,
    pub attempt_id: AttemptId,
    pub module: ModuleType,
    pub reference_id: Uuid,
    pub raw_score: f64,
    pub segment_multiplier: f64,
    pub final_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Score {
    pub fn for_attempt(attempt: &Attempt, raw_score: f64, segment_multiplier: f64) -> Self {
        Self {
            id: ScoreId::new(),
            user_id: attempt.user_id,
            attempt_id: attempt.id,
            module: attempt.module,
            reference_id: attempt.reference_id,
            raw_score,
            segment_multiplier,
            final_score: attempt.score.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

/// Answer given to one survey question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: RecordId,
    pub survey_id: SurveyId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub selected_option_id: Option<OptionId>,
    pub numeric_value: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl SurveyResponse {
    pub fn new(
        survey_id: SurveyId,
        user_id: UserId,
        question_id: QuestionId,
        selected_option_id: Option<OptionId>,
        numeric_value: Option<i32>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            survey_id,
            user_id,
            question_id,
            selected_option_id,
            numeric_value,
            created_at: Utc::now(),
        }
    }
}
