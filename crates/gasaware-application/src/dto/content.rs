//! Video, simulation and survey DTOs
//!
//! Simulation and survey detail views come in two flavors: the learner view
//! hides answer correctness and option values, the authoring view returned
//! to editors shows them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gasaware_domain::entities::{
    Simulation, SimulationOption, SimulationQuestion, Survey, SurveyOption, SurveyQuestion, Video,
    VideoProgress,
};
use gasaware_domain::services::{QuestionResult, SimulationAnswer, SurveyAnswer};
use gasaware_domain::value_objects::{
    AgeGroup, AttemptId, OptionId, QuestionId, QuestionType, SimulationId, SubscriptionType,
    SurveyId, VideoId,
};

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub duration_sec: u32,
    pub tags: Vec<String>,
    pub min_age_group: AgeGroup,
    pub subscription_filter: Option<SubscriptionType>,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoDto {
    pub fn from_domain(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            description: video.description.clone(),
            url: video.url.clone(),
            duration_sec: video.duration_sec,
            tags: video.tags.clone(),
            min_age_group: video.min_age_group,
            subscription_filter: video.subscription_filter,
            thumbnail_url: video.thumbnail_url.clone(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VideoProgressDto {
    pub video_id: VideoId,
    pub video_title: String,
    pub watched_seconds: u32,
    pub total_seconds: u32,
    pub progress_percent: f64,
    pub is_completed: bool,
    pub last_watched_at: DateTime<Utc>,
}

impl VideoProgressDto {
    pub fn from_domain(progress: &VideoProgress, video_title: impl Into<String>) -> Self {
        Self {
            video_id: progress.video_id,
            video_title: video_title.into(),
            watched_seconds: progress.watched_seconds,
            total_seconds: progress.total_seconds,
            progress_percent: progress.progress_percent,
            is_completed: progress.is_completed,
            last_watched_at: progress.last_watched_at,
        }
    }
}

/// Progress report from the player. A zero total falls back to the video duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub watched_seconds: u32,
    #[serde(default)]
    pub total_seconds: u32,
}

// ---------------------------------------------------------------------------
// Simulations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummaryDto {
    pub id: SimulationId,
    pub title: String,
    pub description: String,
    pub min_age_group: AgeGroup,
    pub subscription_filter: Option<SubscriptionType>,
    pub question_count: usize,
}

impl SimulationSummaryDto {
    pub fn from_domain(simulation: &Simulation) -> Self {
        Self {
            id: simulation.id,
            title: simulation.title.clone(),
            description: simulation.description.clone(),
            min_age_group: simulation.min_age_group,
            subscription_filter: simulation.subscription_filter,
            question_count: simulation.questions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationOptionDto {
    pub id: OptionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl SimulationOptionDto {
    fn from_domain(option: &SimulationOption, reveal: bool) -> Self {
        Self {
            id: option.id,
            text: option.text.clone(),
            is_correct: reveal.then_some(option.is_correct),
            explanation: if reveal { option.explanation.clone() } else { None },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationQuestionDto {
    pub id: QuestionId,
    pub text: String,
    pub image_url: Option<String>,
    pub order: i32,
    pub options: Vec<SimulationOptionDto>,
}

impl SimulationQuestionDto {
    fn from_domain(question: &SimulationQuestion, reveal: bool) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            image_url: question.image_url.clone(),
            order: question.order,
            options: question
                .options
                .iter()
                .map(|o| SimulationOptionDto::from_domain(o, reveal))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationDetailDto {
    pub id: SimulationId,
    pub title: String,
    pub description: String,
    pub min_age_group: AgeGroup,
    pub subscription_filter: Option<SubscriptionType>,
    pub questions: Vec<SimulationQuestionDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SimulationDetailDto {
    /// Learner view without correctness or explanations
    pub fn public(simulation: &Simulation) -> Self {
        Self::build(simulation, false)
    }

    /// Editor view with every option's correctness and explanation
    pub fn authoring(simulation: &Simulation) -> Self {
        Self::build(simulation, true)
    }

    fn build(simulation: &Simulation, reveal: bool) -> Self {
        Self {
            id: simulation.id,
            title: simulation.title.clone(),
            description: simulation.description.clone(),
            min_age_group: simulation.min_age_group,
            subscription_filter: simulation.subscription_filter,
            questions: simulation
                .questions
                .iter()
                .map(|q| SimulationQuestionDto::from_domain(q, reveal))
                .collect(),
            created_at: simulation.created_at,
            updated_at: simulation.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationSubmission {
    pub answers: Vec<SimulationAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationResultDto {
    pub attempt_id: AttemptId,
    /// Final score after the segment multiplier
    pub score: f64,
    pub raw_score: f64,
    pub segment_multiplier: f64,
    pub total_questions: usize,
    pub correct_count: usize,
    pub details: Vec<QuestionResult>,
}

// ---------------------------------------------------------------------------
// Surveys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveySummaryDto {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub question_count: usize,
}

impl SurveySummaryDto {
    pub fn from_domain(survey: &Survey) -> Self {
        Self {
            id: survey.id,
            title: survey.title.clone(),
            description: survey.description.clone(),
            question_count: survey.questions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyOptionDto {
    pub id: OptionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

impl SurveyOptionDto {
    fn from_domain(option: &SurveyOption, reveal: bool) -> Self {
        Self {
            id: option.id,
            text: option.text.clone(),
            value: reveal.then_some(option.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestionDto {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub weight: u32,
    pub order: i32,
    pub age_group_filter: Option<AgeGroup>,
    pub subscription_filter: Option<SubscriptionType>,
    pub options: Vec<SurveyOptionDto>,
}

impl SurveyQuestionDto {
    fn from_domain(question: &SurveyQuestion, reveal: bool) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            question_type: question.question_type,
            weight: question.weight,
            order: question.order,
            age_group_filter: question.age_group_filter,
            subscription_filter: question.subscription_filter,
            options: question
                .options
                .iter()
                .map(|o| SurveyOptionDto::from_domain(o, reveal))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyDetailDto {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub questions: Vec<SurveyQuestionDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SurveyDetailDto {
    /// Respondent view without option values
    pub fn public(survey: &Survey) -> Self {
        Self::build(survey, false)
    }

    pub fn authoring(survey: &Survey) -> Self {
        Self::build(survey, true)
    }

    fn build(survey: &Survey, reveal: bool) -> Self {
        Self {
            id: survey.id,
            title: survey.title.clone(),
            description: survey.description.clone(),
            is_active: survey.is_active,
            questions: survey
                .questions
                .iter()
                .map(|q| SurveyQuestionDto::from_domain(q, reveal))
                .collect(),
            created_at: survey.created_at,
            updated_at: survey.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub answers: Vec<SurveyAnswer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyResultDto {
    pub message: String,
    pub attempt_id: AttemptId,
    /// Final score after the segment multiplier
    pub score: f64,
    pub raw_score: f64,
    pub segment_multiplier: f64,
    pub answered_count: usize,
}
