//! Simulation scenarios: ordered single-correct-answer questions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Identified};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AgeGroup, OptionId, QuestionId, SimulationId, SubscriptionType};

const MAX_TITLE_LEN: usize = 200;
const MAX_QUESTION_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationOptionDraft {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationQuestionDraft {
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order: i32,
    pub options: Vec<SimulationOptionDraft>,
}

/// Editable content of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `Child` when absent
    #[serde(default)]
    pub min_age_group: Option<AgeGroup>,
    #[serde(default)]
    pub subscription_filter: Option<SubscriptionType>,
    #[serde(default)]
    pub questions: Vec<SimulationQuestionDraft>,
}

impl SimulationDraft {
    /// Every question needs text, at least two options and exactly one correct option
    pub fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;

        for (index, question) in self.questions.iter().enumerate() {
            let field = format!("questions[{index}]");
            require_text(&field, &question.text, MAX_QUESTION_LEN)?;

            if question.options.len() < 2 {
                return Err(DomainError::validation(field, "needs at least two options"));
            }
            if question.options.iter().any(|o| o.text.trim().is_empty()) {
                return Err(DomainError::validation(field, "option text cannot be empty"));
            }
            let correct = question.options.iter().filter(|o| o.is_correct).count();
            if correct != 1 {
                return Err(DomainError::validation(
                    field,
                    format!("needs exactly one correct option, found {correct}"),
                ));
            }
        }
        Ok(())
    }

    fn build_questions(self) -> Vec<SimulationQuestion> {
        let mut questions: Vec<SimulationQuestion> = self
            .questions
            .into_iter()
            .map(|q| SimulationQuestion {
                id: QuestionId::new(),
                text: q.text.trim().to_string(),
                image_url: q.image_url,
                order: q.order,
                options: q
                    .options
                    .into_iter()
                    .map(|o| SimulationOption {
                        id: OptionId::new(),
                        text: o.text,
                        is_correct: o.is_correct,
                        explanation: o.explanation,
                    })
                    .collect(),
            })
            .collect();
        questions.sort_by_key(|q| q.order);
        questions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOption {
    pub id: OptionId,
    pub text: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationQuestion {
    pub id: QuestionId,
    pub text: String,
    pub image_url: Option<String>,
    pub order: i32,
    pub options: Vec<SimulationOption>,
}

impl SimulationQuestion {
    pub fn option(&self, id: OptionId) -> Option<&SimulationOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn correct_option(&self) -> Option<&SimulationOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

/// Branching quiz scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub id: SimulationId,
    pub title: String,
    pub description: String,
    pub min_age_group: AgeGroup,
    pub subscription_filter: Option<SubscriptionType>,
    pub is_published: bool,
    /// Sorted by `order`
    pub questions: Vec<SimulationQuestion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Simulation {
    /// Create a published simulation
    pub fn publish(draft: SimulationDraft) -> DomainResult<Self> {
        draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: SimulationId::new(),
            title: draft.title.trim().to_string(),
            description: draft.description.clone(),
            min_age_group: draft.min_age_group.unwrap_or(AgeGroup::Child),
            subscription_filter: draft.subscription_filter,
            is_published: true,
            questions: draft.build_questions(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite metadata and replace the whole question set
    pub fn replace(&mut self, draft: SimulationDraft) -> DomainResult<()> {
        draft.validate()?;
        self.title = draft.title.trim().to_string();
        self.description = draft.description.clone();
        self.min_age_group = draft.min_age_group.unwrap_or(AgeGroup::Child);
        self.subscription_filter = draft.subscription_filter;
        self.questions = draft.build_questions();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn question(&self, id: QuestionId) -> Option<&SimulationQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl Identified for Simulation {
    type Id = SimulationId;

    fn id(&self) -> SimulationId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, is_correct: bool) -> SimulationOptionDraft {
        SimulationOptionDraft {
            text: text.into(),
            is_correct,
            explanation: None,
        }
    }

    fn question(order: i32, options: Vec<SimulationOptionDraft>) -> SimulationQuestionDraft {
        SimulationQuestionDraft {
            text: format!("Question {order}"),
            image_url: None,
            order,
            options,
        }
    }

    fn draft(questions: Vec<SimulationQuestionDraft>) -> SimulationDraft {
        SimulationDraft {
            title: "Leak at home".into(),
            description: String::new(),
            min_age_group: None,
            subscription_filter: None,
            questions,
        }
    }

    #[test]
    fn test_publish_sorts_questions_and_defaults_age() {
        let sim = Simulation::publish(draft(vec![
            question(2, vec![option("a", true), option("b", false)]),
            question(1, vec![option("c", false), option("d", true)]),
        ]))
        .unwrap();

        assert_eq!(sim.min_age_group, AgeGroup::Child);
        assert!(sim.is_published);
        assert_eq!(sim.questions[0].order, 1);
        assert_eq!(sim.questions[0].correct_option().unwrap().text, "d");
    }

    #[test]
    fn test_rejects_multiple_correct_options() {
        let err = Simulation::publish(draft(vec![question(
            1,
            vec![option("a", true), option("b", true)],
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("exactly one correct"));
    }

    #[test]
    fn test_rejects_single_option() {
        assert!(Simulation::publish(draft(vec![question(1, vec![option("a", true)])])).is_err());
    }

    #[test]
    fn test_replace_swaps_question_ids() {
        let first = question(1, vec![option("a", true), option("b", false)]);
        let mut sim = Simulation::publish(draft(vec![first])).unwrap();
        let old_id = sim.questions[0].id;

        sim.replace(draft(vec![question(1, vec![option("x", false), option("y", true)])]))
            .unwrap();
        assert_eq!(sim.questions.len(), 1);
        assert_ne!(sim.questions[0].id, old_id);
        assert!(sim.question(old_id).is_none());
    }
}
