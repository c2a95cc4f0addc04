//! Property-based tests for scoring and segmentation
//!
//! These tests verify that scores stay within bounds and that age-group
//! rules hold across all inputs.

use chrono::NaiveDate;
use gasaware_domain::entities::{
    Simulation, SimulationDraft, SimulationOptionDraft, SimulationQuestionDraft, Survey,
    SurveyDraft, SurveyOptionDraft, SurveyQuestionDraft,
};
use gasaware_domain::services::{
    apply_multiplier, score_simulation, score_survey, SimulationAnswer, SurveyAnswer, MAX_SCORE,
};
use gasaware_domain::value_objects::*;
use proptest::prelude::*;

fn simulation(questions: usize) -> Simulation {
    let questions = (0..questions)
        .map(|i| SimulationQuestionDraft {
            text: format!("Question {i}"),
            image_url: None,
            order: i as i32,
            options: vec![
                SimulationOptionDraft {
                    text: "yes".into(),
                    is_correct: true,
                    explanation: None,
                },
                SimulationOptionDraft {
                    text: "no".into(),
                    is_correct: false,
                    explanation: None,
                },
            ],
        })
        .collect();
    Simulation::publish(SimulationDraft {
        title: "Property".into(),
        description: String::new(),
        min_age_group: None,
        subscription_filter: None,
        questions,
    })
    .unwrap()
}

fn survey(weights: &[u32], values: &[i32]) -> Survey {
    let questions = weights
        .iter()
        .enumerate()
        .map(|(i, weight)| SurveyQuestionDraft {
            text: format!("Question {i}"),
            question_type: QuestionType::SingleChoice,
            weight: *weight,
            order: i as i32,
            age_group_filter: None,
            subscription_filter: None,
            options: vec![
                SurveyOptionDraft {
                    text: "picked".into(),
                    value: values[i % values.len()],
                },
                SurveyOptionDraft {
                    text: "other".into(),
                    value: 0,
                },
            ],
        })
        .collect();
    Survey::create(SurveyDraft {
        title: "Property".into(),
        description: String::new(),
        is_active: true,
        questions,
    })
    .unwrap()
}

// ============================================================================
// Simulation scoring
// ============================================================================

proptest! {
    /// Raw score equals the share of correctly answered questions
    #[test]
    fn test_simulation_raw_is_percent_correct(picks in prop::collection::vec(any::<bool>(), 1..20)) {
        let sim = simulation(picks.len());
        let answers: Vec<SimulationAnswer> = sim
            .questions
            .iter()
            .zip(&picks)
            .map(|(q, correct)| SimulationAnswer {
                question_id: q.id,
                selected_option_id: q.options.iter().find(|o| o.is_correct == *correct).unwrap().id,
            })
            .collect();

        let outcome = score_simulation(&sim, &answers);
        let expected = picks.iter().filter(|c| **c).count() as f64 / picks.len() as f64 * 100.0;
        prop_assert!((outcome.raw_score - expected).abs() < 1e-9);
        prop_assert!(outcome.raw_score >= 0.0 && outcome.raw_score <= MAX_SCORE);
    }

    /// Answering every question several times never inflates the score
    #[test]
    fn test_simulation_duplicates_do_not_inflate(repeats in 1usize..5, count in 1usize..10) {
        let sim = simulation(count);
        let correct = |q: &gasaware_domain::entities::SimulationQuestion| SimulationAnswer {
            question_id: q.id,
            selected_option_id: q.correct_option().unwrap().id,
        };
        let answers: Vec<SimulationAnswer> = (0..repeats)
            .flat_map(|_| sim.questions.iter().map(correct))
            .collect();

        let outcome = score_simulation(&sim, &answers);
        prop_assert_eq!(outcome.correct_count, count);
        prop_assert!((outcome.raw_score - 100.0).abs() < 1e-9);
    }
}

// ============================================================================
// Survey scoring
// ============================================================================

proptest! {
    /// Raw survey score stays within 0..=100 for any weights and option values
    #[test]
    fn test_survey_raw_bounded(
        weights in prop::collection::vec(1u32..50, 1..10),
        values in prop::collection::vec(0i32..=100, 1..10),
    ) {
        let survey = survey(&weights, &values);
        let answers: Vec<SurveyAnswer> = survey
            .questions
            .iter()
            .map(|q| SurveyAnswer {
                question_id: q.id,
                selected_option_id: Some(q.options[0].id),
                numeric_value: None,
            })
            .collect();

        let outcome = score_survey(&survey, &answers).unwrap();
        prop_assert!(outcome.raw_score >= 0.0);
        prop_assert!(outcome.raw_score <= MAX_SCORE + 1e-9);
        prop_assert_eq!(outcome.accepted.len(), weights.len());
    }

    /// Final score never exceeds the cap
    #[test]
    fn test_final_score_capped(raw in 0.0f64..=100.0, multiplier in 0.01f64..=10.0) {
        let final_score = apply_multiplier(raw, multiplier);
        prop_assert!(final_score <= MAX_SCORE);
        prop_assert!(final_score >= 0.0);
        if raw * multiplier <= MAX_SCORE {
            prop_assert!((final_score - raw * multiplier).abs() < 1e-9);
        }
    }
}

// ============================================================================
// Age groups
// ============================================================================

proptest! {
    /// Age groups are monotonic in age
    #[test]
    fn test_age_group_monotonic(a in 0i32..120, b in 0i32..120) {
        let (young, old) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(AgeGroup::from_age(young) <= AgeGroup::from_age(old));
    }

    /// Age is never negative for past birth dates and matches the year gap within one
    #[test]
    fn test_age_on_close_to_year_gap(year in 1920i32..2020, month in 1u32..=12, day in 1u32..=28) {
        let birth = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let age = age_on(birth, today);
        let gap = 2026 - year;
        prop_assert!(age == gap || age == gap - 1);
    }

    /// Every group can access its own content and Child content
    #[test]
    fn test_access_is_reflexive(age in 0i32..120) {
        let group = AgeGroup::from_age(age);
        prop_assert!(group.can_access(group));
        prop_assert!(group.can_access(AgeGroup::Child));
    }
}
