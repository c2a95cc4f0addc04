//! Property tests: recorded scores stay within bounds for any rule and answer set

use chrono::NaiveDate;
use proptest::prelude::*;

use gasaware_application::{SimulationSubmission, SurveySubmission};
use gasaware_domain::entities::TargetingRuleDraft;
use gasaware_domain::services::{ContentFilter, SimulationAnswer, SurveyAnswer, MAX_SCORE};
use gasaware_domain::value_objects::{ModuleType, SubscriptionType};
use gasaware_integration_tests::TestPlatform;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Any option picks under any scoped multiplier: final = min(raw * m, 100)
    #[test]
    fn simulation_score_is_capped_product(
        multiplier in 0.1f64..=10.0,
        picks in proptest::collection::vec(0usize..3, 3),
    ) {
        runtime().block_on(async {
            let platform = TestPlatform::start().await.unwrap();
            let learner = platform
                .register_verified(
                    "prop@example.com",
                    NaiveDate::from_ymd_opt(1980, 2, 2).unwrap(),
                    SubscriptionType::Merkezi,
                )
                .await
                .unwrap();

            let list = platform.state.simulations.list(ContentFilter::default()).await.unwrap();
            let simulation = platform.state.simulations.get(&list[0].id).await.unwrap();
            platform
                .state
                .rules
                .create(TargetingRuleDraft {
                    module: ModuleType::Simulation,
                    reference_id: Some(simulation.id.as_uuid()),
                    age_group: None,
                    subscription_type: None,
                    score_multiplier: multiplier,
                    is_active: true,
                    description: String::new(),
                })
                .await
                .unwrap();

            let answers = simulation
                .questions
                .iter()
                .zip(&picks)
                .map(|(q, &pick)| SimulationAnswer {
                    question_id: q.id,
                    selected_option_id: q.options[pick % q.options.len()].id,
                })
                .collect();
            let result = platform
                .state
                .simulations
                .submit(&learner.user_id, &simulation.id, SimulationSubmission { answers })
                .await
                .unwrap();

            assert!((0.0..=MAX_SCORE).contains(&result.raw_score));
            assert!((0.0..=MAX_SCORE).contains(&result.score));
            assert!((result.segment_multiplier - multiplier).abs() < 1e-12);
            let expected = (result.raw_score * multiplier).min(MAX_SCORE);
            assert!((result.score - expected).abs() < 1e-9);
        });
    }

    /// Any mix of options and scale values keeps survey scores in 0..=100
    #[test]
    fn survey_score_in_bounds(
        first in 0usize..4,
        second in 0usize..2,
        scale in 0i32..=10,
        skip_scale in any::<bool>(),
    ) {
        runtime().block_on(async {
            let platform = TestPlatform::start().await.unwrap();
            let learner = platform
                .register_verified(
                    "survey-prop@example.com",
                    NaiveDate::from_ymd_opt(1950, 7, 7).unwrap(),
                    SubscriptionType::Bireysel,
                )
                .await
                .unwrap();

            let surveys = platform.state.surveys.list_active(ContentFilter::default()).await.unwrap();
            let survey = platform.state.surveys.get(&surveys[0].id).await.unwrap();
            let q = &survey.questions;

            let mut answers = vec![
                SurveyAnswer {
                    question_id: q[0].id,
                    selected_option_id: Some(q[0].options[first].id),
                    numeric_value: None,
                },
                SurveyAnswer {
                    question_id: q[1].id,
                    selected_option_id: Some(q[1].options[second].id),
                    numeric_value: None,
                },
            ];
            if !skip_scale {
                answers.push(SurveyAnswer {
                    question_id: q[2].id,
                    selected_option_id: None,
                    numeric_value: Some(scale),
                });
            }

            let result = platform
                .state
                .surveys
                .submit(&learner.user_id, &survey.id, SurveySubmission { answers })
                .await
                .unwrap();
            assert_eq!(result.answered_count, if skip_scale { 2 } else { 3 });
            assert!((0.0..=MAX_SCORE).contains(&result.raw_score));
            assert!((0.0..=MAX_SCORE).contains(&result.score));
        });
    }
}
