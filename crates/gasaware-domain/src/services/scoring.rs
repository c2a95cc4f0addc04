//! Quiz and survey scoring
//!
//! Both modules produce a raw score in `0..=100`. The final score applies a
//! segment multiplier and is capped at [`MAX_SCORE`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::{Simulation, Survey};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{OptionId, QuestionId, QuestionType};

/// Upper bound of every score
pub const MAX_SCORE: f64 = 100.0;

/// Selected option for one simulation question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SimulationAnswer {
    pub question_id: QuestionId,
    pub selected_option_id: OptionId,
}

/// Per-question feedback returned after a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub question_text: String,
    pub is_correct: bool,
    /// Selected option's explanation, falling back to the correct option's
    pub explanation: Option<String>,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub correct_count: usize,
    pub total_questions: usize,
    pub raw_score: f64,
    pub details: Vec<QuestionResult>,
}

/// Score answers against a simulation. Only the first answer per question
/// counts and answers to foreign questions are ignored.
pub fn score_simulation(
    simulation: &Simulation,
    answers: &[SimulationAnswer],
) -> SimulationOutcome {
    let mut seen = HashSet::new();
    let mut details = Vec::new();
    let mut correct_count = 0;

    for answer in answers {
        let Some(question) = simulation.question(answer.question_id) else {
            continue;
        };
        if !seen.insert(question.id) {
            continue;
        }

        let selected = question.option(answer.selected_option_id);
        let correct = question.correct_option();
        let is_correct = selected.is_some_and(|o| o.is_correct);
        if is_correct {
            correct_count += 1;
        }

        details.push(QuestionResult {
            question_id: question.id,
            question_text: question.text.clone(),
            is_correct,
            explanation: selected
                .and_then(|o| o.explanation.clone())
                .or_else(|| correct.and_then(|o| o.explanation.clone())),
            correct_answer: correct.map(|o| o.text.clone()),
        });
    }

    let total_questions = simulation.questions.len();
    let raw_score = if total_questions == 0 {
        0.0
    } else {
        correct_count as f64 / total_questions as f64 * MAX_SCORE
    };

    SimulationOutcome {
        correct_count,
        total_questions,
        raw_score,
        details,
    }
}

/// Answer to one survey question: an option, a scale value, or neither
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnswer {
    pub question_id: QuestionId,
    #[serde(default)]
    pub selected_option_id: Option<OptionId>,
    #[serde(default)]
    pub numeric_value: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyOutcome {
    pub earned: f64,
    pub total_weight: f64,
    pub raw_score: f64,
    /// Answers that were scored, in submission order
    pub accepted: Vec<SurveyAnswer>,
}

/// Weighted survey score.
///
/// A selected option earns `value / 100 * weight`; otherwise a numeric
/// answer to a scale question earns `numeric / 10 * weight`. Numeric values
/// outside `0..=10` are rejected.
pub fn score_survey(survey: &Survey, answers: &[SurveyAnswer]) -> DomainResult<SurveyOutcome> {
    if let Some(bad) = answers
        .iter()
        .filter_map(|a| a.numeric_value)
        .find(|v| !(0..=QuestionType::SCALE_MAX).contains(v))
    {
        return Err(DomainError::validation(
            "numeric_value",
            format!("{bad} outside 0..={}", QuestionType::SCALE_MAX),
        ));
    }

    let mut seen = HashSet::new();
    let mut accepted = Vec::new();
    let mut earned = 0.0;
    let mut total_weight = 0.0;

    for answer in answers {
        let Some(question) = survey.question(answer.question_id) else {
            continue;
        };
        if !seen.insert(question.id) {
            continue;
        }
        accepted.push(*answer);

        let weight = f64::from(question.weight);
        total_weight += weight;

        if let Some(option_id) = answer.selected_option_id {
            if let Some(option) = question.option(option_id) {
                earned += f64::from(option.value) / 100.0 * weight;
            }
        } else if let (Some(value), QuestionType::Scale) =
            (answer.numeric_value, question.question_type)
        {
            earned += f64::from(value) / f64::from(QuestionType::SCALE_MAX) * weight;
        }
    }

    let raw_score = if total_weight > 0.0 {
        earned / total_weight * MAX_SCORE
    } else {
        0.0
    };

    Ok(SurveyOutcome {
        earned,
        total_weight,
        raw_score,
        accepted,
    })
}

/// `min(raw * multiplier, 100)`
pub fn apply_multiplier(raw_score: f64, multiplier: f64) -> f64 {
    (raw_score * multiplier).min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        SimulationDraft, SimulationOptionDraft, SimulationQuestionDraft, SurveyDraft,
        SurveyOptionDraft, SurveyQuestionDraft,
    };

    fn simulation(questions: usize) -> Simulation {
        let questions = (0..questions)
            .map(|i| SimulationQuestionDraft {
                text: format!("Q{i}"),
                image_url: None,
                order: i as i32,
                options: vec![
                    SimulationOptionDraft {
                        text: "right".into(),
                        is_correct: true,
                        explanation: Some("because".into()),
                    },
                    SimulationOptionDraft {
                        text: "wrong".into(),
                        is_correct: false,
                        explanation: None,
                    },
                ],
            })
            .collect();
        Simulation::publish(SimulationDraft {
            title: "Sim".into(),
            description: String::new(),
            min_age_group: None,
            subscription_filter: None,
            questions,
        })
        .unwrap()
    }

    fn pick(sim: &Simulation, index: usize, correct: bool) -> SimulationAnswer {
        let q = &sim.questions[index];
        let option = q.options.iter().find(|o| o.is_correct == correct).unwrap();
        SimulationAnswer {
            question_id: q.id,
            selected_option_id: option.id,
        }
    }

    #[test]
    fn test_simulation_half_correct() {
        let sim = simulation(4);
        let answers = [pick(&sim, 0, true), pick(&sim, 1, true), pick(&sim, 2, false)];
        let outcome = score_simulation(&sim, &answers);

        assert_eq!(outcome.correct_count, 2);
        assert_eq!(outcome.total_questions, 4);
        assert!((outcome.raw_score - 50.0).abs() < 1e-9);
        assert_eq!(outcome.details.len(), 3);
        assert_eq!(outcome.details[2].explanation.as_deref(), Some("because"));
        assert_eq!(outcome.details[2].correct_answer.as_deref(), Some("right"));
    }

    #[test]
    fn test_simulation_first_answer_wins() {
        let sim = simulation(1);
        let answers = [pick(&sim, 0, false), pick(&sim, 0, true)];
        let outcome = score_simulation(&sim, &answers);
        assert_eq!(outcome.correct_count, 0);
        assert_eq!(outcome.details.len(), 1);
    }

    #[test]
    fn test_simulation_ignores_foreign_questions() {
        let sim = simulation(2);
        let answers = [SimulationAnswer {
            question_id: QuestionId::new(),
            selected_option_id: OptionId::new(),
        }];
        let outcome = score_simulation(&sim, &answers);
        assert!(outcome.details.is_empty());
        assert_eq!(outcome.raw_score, 0.0);
    }

    #[test]
    fn test_empty_simulation_scores_zero() {
        let outcome = score_simulation(&simulation(0), &[]);
        assert_eq!(outcome.raw_score, 0.0);
    }

    fn survey() -> Survey {
        Survey::create(SurveyDraft {
            title: "Survey".into(),
            description: String::new(),
            is_active: true,
            questions: vec![
                SurveyQuestionDraft {
                    text: "Choice".into(),
                    question_type: QuestionType::SingleChoice,
                    weight: 30,
                    order: 1,
                    age_group_filter: None,
                    subscription_filter: None,
                    options: vec![
                        SurveyOptionDraft {
                            text: "best".into(),
                            value: 100,
                        },
                        SurveyOptionDraft {
                            text: "half".into(),
                            value: 50,
                        },
                    ],
                },
                SurveyQuestionDraft {
                    text: "Scale".into(),
                    question_type: QuestionType::Scale,
                    weight: 10,
                    order: 2,
                    age_group_filter: None,
                    subscription_filter: None,
                    options: vec![],
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_survey_weighted_score() {
        let survey = survey();
        let choice = &survey.questions[0];
        let scale = &survey.questions[1];
        let answers = [
            SurveyAnswer {
                question_id: choice.id,
                selected_option_id: Some(choice.options[1].id),
                numeric_value: None,
            },
            SurveyAnswer {
                question_id: scale.id,
                selected_option_id: None,
                numeric_value: Some(8),
            },
        ];
        let outcome = score_survey(&survey, &answers).unwrap();
        // 0.5*30 + 0.8*10 = 23 of 40
        assert!((outcome.earned - 23.0).abs() < 1e-9);
        assert!((outcome.raw_score - 57.5).abs() < 1e-9);
        assert_eq!(outcome.accepted.len(), 2);
    }

    #[test]
    fn test_survey_numeric_out_of_range() {
        let survey = survey();
        let answers = [SurveyAnswer {
            question_id: survey.questions[1].id,
            selected_option_id: None,
            numeric_value: Some(11),
        }];
        assert!(score_survey(&survey, &answers).is_err());
    }

    #[test]
    fn test_survey_numeric_on_choice_question_earns_nothing() {
        let survey = survey();
        let answers = [SurveyAnswer {
            question_id: survey.questions[0].id,
            selected_option_id: None,
            numeric_value: Some(10),
        }];
        let outcome = score_survey(&survey, &answers).unwrap();
        assert_eq!(outcome.raw_score, 0.0);
        assert_eq!(outcome.total_weight, 30.0);
    }

    #[test]
    fn test_apply_multiplier_caps() {
        assert_eq!(apply_multiplier(90.0, 1.2), MAX_SCORE);
        assert!((apply_multiplier(50.0, 1.1) - 55.0).abs() < 1e-9);
    }
}
