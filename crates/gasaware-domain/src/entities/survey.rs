//! Weighted surveys

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Identified};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{
    AgeGroup, OptionId, QuestionId, QuestionType, SubscriptionType, SurveyId,
};

const MAX_TITLE_LEN: usize = 200;
const MAX_QUESTION_LEN: usize = 1000;
/// Highest value an option may carry
pub const MAX_OPTION_VALUE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyOptionDraft {
    pub text: String,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuestionDraft {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub age_group_filter: Option<AgeGroup>,
    #[serde(default)]
    pub subscription_filter: Option<SubscriptionType>,
    #[serde(default)]
    pub options: Vec<SurveyOptionDraft>,
}

fn default_weight() -> u32 {
    1
}

/// Editable content of a survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<SurveyQuestionDraft>,
}

impl SurveyDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;

        for (index, question) in self.questions.iter().enumerate() {
            let field = format!("questions[{index}]");
            require_text(&field, &question.text, MAX_QUESTION_LEN)?;

            if question.weight == 0 {
                return Err(DomainError::validation(field, "weight must be positive"));
            }
            if question.question_type != QuestionType::Scale && question.options.len() < 2 {
                return Err(DomainError::validation(field, "needs at least two options"));
            }
            if let Some(bad) = question
                .options
                .iter()
                .find(|o| !(0..=MAX_OPTION_VALUE).contains(&o.value))
            {
                return Err(DomainError::validation(
                    field,
                    format!("option value {} outside 0..={MAX_OPTION_VALUE}", bad.value),
                ));
            }
        }
        Ok(())
    }

    fn build_questions(self) -> Vec<SurveyQuestion> {
        let mut questions: Vec<SurveyQuestion> = self
            .questions
            .into_iter()
            .map(|q| SurveyQuestion {
                id: QuestionId::new(),
                text: q.text.trim().to_string(),
                question_type: q.question_type,
                weight: q.weight,
                order: q.order,
                age_group_filter: q.age_group_filter,
                subscription_filter: q.subscription_filter,
                options: q
                    .options
                    .into_iter()
                    .map(|o| SurveyOption {
                        id: OptionId::new(),
                        text: o.text,
                        value: o.value,
                    })
                    .collect(),
            })
            .collect();
        questions.sort_by_key(|q| q.order);
        questions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyOption {
    pub id: OptionId,
    pub text: String,
    /// Credit in percent of the question weight, 0..=100
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub id: QuestionId,
    pub text: String,
    pub question_type: QuestionType,
    pub weight: u32,
    pub order: i32,
    pub age_group_filter: Option<AgeGroup>,
    pub subscription_filter: Option<SubscriptionType>,
    pub options: Vec<SurveyOption>,
}

impl SurveyQuestion {
    pub fn option(&self, id: OptionId) -> Option<&SurveyOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    /// Sorted by `order`
    pub questions: Vec<SurveyQuestion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    pub fn create(draft: SurveyDraft) -> DomainResult<Self> {
        draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: SurveyId::new(),
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            is_active: draft.is_active,
            questions: draft.build_questions(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite metadata and replace the whole question set
    pub fn replace(&mut self, draft: SurveyDraft) -> DomainResult<()> {
        draft.validate()?;
        self.title = draft.title.trim().to_string();
        self.description = draft.description.clone();
        self.is_active = draft.is_active;
        self.questions = draft.build_questions();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn question(&self, id: QuestionId) -> Option<&SurveyQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl Identified for Survey {
    type Id = SurveyId;

    fn id(&self) -> SurveyId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(weight: u32, values: &[i32]) -> SurveyQuestionDraft {
        SurveyQuestionDraft {
            text: "Which number do you call?".into(),
            question_type: QuestionType::SingleChoice,
            weight,
            order: 0,
            age_group_filter: None,
            subscription_filter: None,
            options: values
                .iter()
                .map(|v| SurveyOptionDraft {
                    text: v.to_string(),
                    value: *v,
                })
                .collect(),
        }
    }

    fn draft(questions: Vec<SurveyQuestionDraft>) -> SurveyDraft {
        SurveyDraft {
            title: "Awareness".into(),
            description: String::new(),
            is_active: true,
            questions,
        }
    }

    #[test]
    fn test_create_valid_survey() {
        let survey = Survey::create(draft(vec![choice(20, &[0, 100])])).unwrap();
        assert_eq!(survey.questions.len(), 1);
        assert_eq!(survey.questions[0].weight, 20);
    }

    #[test]
    fn test_scale_question_needs_no_options() {
        let mut q = choice(10, &[]);
        q.question_type = QuestionType::Scale;
        assert!(Survey::create(draft(vec![q])).is_ok());
    }

    #[test]
    fn test_rejects_zero_weight_and_bad_values() {
        assert!(Survey::create(draft(vec![choice(0, &[0, 100])])).is_err());
        assert!(Survey::create(draft(vec![choice(5, &[0, 150])])).is_err());
        assert!(Survey::create(draft(vec![choice(5, &[100])])).is_err());
    }

    #[test]
    fn test_draft_deserializes_type_field() {
        let json = r#"{
            "title": "T",
            "isActive": true,
            "questions": [{"text": "Q", "type": "Scale", "weight": 3}]
        }"#;
        let draft: SurveyDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.questions[0].question_type, QuestionType::Scale);
        assert_eq!(draft.questions[0].weight, 3);
    }
}
