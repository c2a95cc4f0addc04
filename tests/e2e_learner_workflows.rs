//! End-to-End Test Suite: learner journeys across segments
//!
//! Registers learners in different age groups and subscription tiers, walks
//! them through the catalog, scores their runs and checks that targeting
//! rules and admin reports see the same numbers.

use chrono::NaiveDate;

use gasaware_application::{SimulationDetailDto, SimulationSubmission};
use gasaware_domain::entities::TargetingRuleDraft;
use gasaware_domain::services::{ContentFilter, SimulationAnswer};
use gasaware_domain::value_objects::{AgeGroup, ModuleType, SimulationId, SubscriptionType};
use gasaware_integration_tests::{TestPlatform, ADMIN_EMAIL, ADMIN_PASSWORD};

const CORRECT_ANSWERS: [&str; 3] = [
    "Open the windows and ventilate",
    "Press a light switch",
    "Counter-clockwise",
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

async fn seeded_simulation(platform: &TestPlatform) -> SimulationDetailDto {
    let list = platform
        .state
        .simulations
        .list(ContentFilter::default())
        .await
        .expect("Failed to list simulations");
    platform
        .state
        .simulations
        .get(&list[0].id)
        .await
        .expect("Failed to load simulation")
}

/// Answer the first `correct` questions right and the rest wrong
fn answers(simulation: &SimulationDetailDto, correct: usize) -> SimulationSubmission {
    let answers = simulation
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let option = question
                .options
                .iter()
                .find(|o| (index < correct) == CORRECT_ANSWERS.contains(&o.text.as_str()))
                .expect("question has a matching option");
            SimulationAnswer {
                question_id: question.id,
                selected_option_id: option.id,
            }
        })
        .collect();
    SimulationSubmission { answers }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// Senior learner: catalog includes senior content, simulation scores carry
/// the senior targeting rule.
#[tokio::test]
async fn test_senior_learner_journey() {
    let platform = TestPlatform::start().await.expect("Failed to start platform");
    let senior = platform
        .register_verified("senior@example.com", date(1950, 3, 1), SubscriptionType::Bireysel)
        .await
        .expect("Failed to register senior");

    let profile = platform
        .state
        .auth
        .profile(&senior.user_id)
        .await
        .expect("Failed to load profile");
    assert_eq!(profile.age_group, AgeGroup::Senior);

    let filter = ContentFilter::new(Some(profile.age_group), Some(profile.subscription_type));
    let videos = platform
        .state
        .videos
        .list(filter, None)
        .await
        .expect("Failed to list videos");
    let titles: Vec<&str> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles.len(), 4);
    assert!(titles.contains(&"Gas Safety for Seniors"));
    assert!(!titles.contains(&"Industrial Gas Safety"));

    let simulation = seeded_simulation(&platform).await;
    let result = platform
        .state
        .simulations
        .submit(&senior.user_id, &simulation.id, answers(&simulation, 2))
        .await
        .expect("Failed to submit answers");
    assert_eq!(result.correct_count, 2);
    assert_close(result.segment_multiplier, 1.2);
    assert_close(result.score, 80.0);

    let scores = platform
        .state
        .scoring
        .scores_for(&senior.user_id)
        .await
        .expect("Failed to load scores");
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].module, ModuleType::Simulation);
}

/// Industrial subscriber: the subscription rule applies, senior video stays hidden
#[tokio::test]
async fn test_industrial_learner_journey() {
    let platform = TestPlatform::start().await.expect("Failed to start platform");
    let worker = platform
        .register_verified("plant@example.com", date(1988, 9, 20), SubscriptionType::Endustriyel)
        .await
        .expect("Failed to register industrial learner");

    let filter = ContentFilter::new(Some(AgeGroup::Adult), Some(SubscriptionType::Endustriyel));
    let videos = platform.state.videos.list(filter, Some("safety")).await.unwrap();
    let titles: Vec<&str> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["How to Recognize a Gas Leak", "Industrial Gas Safety"]);

    let simulation = seeded_simulation(&platform).await;
    let result = platform
        .state
        .simulations
        .submit(&worker.user_id, &simulation.id, answers(&simulation, 3))
        .await
        .unwrap();
    assert_close(result.raw_score, 100.0);
    assert_close(result.segment_multiplier, 1.1);
    assert_close(result.score, 100.0);
}

/// Admin narrows a rule to one simulation; later attempts use it, earlier
/// attempts keep their recorded multiplier.
#[tokio::test]
async fn test_admin_rule_changes_future_scores() {
    let platform = TestPlatform::start().await.unwrap();
    let senior = platform
        .register_verified("elder@example.com", date(1945, 1, 1), SubscriptionType::Merkezi)
        .await
        .unwrap();
    let simulation = seeded_simulation(&platform).await;

    let before = platform
        .state
        .simulations
        .submit(&senior.user_id, &simulation.id, answers(&simulation, 1))
        .await
        .unwrap();
    assert_close(before.segment_multiplier, 1.2);

    platform
        .state
        .rules
        .create(TargetingRuleDraft {
            module: ModuleType::Simulation,
            reference_id: Some(simulation.id.as_uuid()),
            age_group: Some(AgeGroup::Senior),
            subscription_type: None,
            score_multiplier: 1.5,
            is_active: true,
            description: "leak scenario for seniors".into(),
        })
        .await
        .expect("Failed to create rule");

    let after = platform
        .state
        .simulations
        .submit(&senior.user_id, &simulation.id, answers(&simulation, 1))
        .await
        .unwrap();
    assert_close(after.segment_multiplier, 1.5);
    assert_close(after.score, 50.0);

    let scores = platform.state.scoring.scores_for(&senior.user_id).await.unwrap();
    let mut multipliers: Vec<f64> = scores.iter().map(|s| s.segment_multiplier).collect();
    multipliers.sort_by(f64::total_cmp);
    assert_eq!(multipliers, vec![1.2, 1.5]);
}

/// Reports aggregate attempts per segment and ignore empty segments
#[tokio::test]
async fn test_reports_follow_attempts() {
    let platform = TestPlatform::start().await.unwrap();
    let simulation = seeded_simulation(&platform).await;

    let senior = platform
        .register_verified("one@example.com", date(1940, 5, 5), SubscriptionType::Bireysel)
        .await
        .unwrap();
    let adult = platform
        .register_verified("two@example.com", date(1992, 5, 5), SubscriptionType::Bireysel)
        .await
        .unwrap();

    platform
        .state
        .simulations
        .submit(&senior.user_id, &simulation.id, answers(&simulation, 3))
        .await
        .unwrap();
    platform
        .state
        .simulations
        .submit(&adult.user_id, &simulation.id, answers(&simulation, 0))
        .await
        .unwrap();

    let report = platform.state.reports.summary().await.unwrap();
    assert_eq!(report.total_users, 4);
    assert_eq!(report.total_attempts, 2);
    assert_close(report.average_score, 50.0);

    let senior_stats = report
        .by_age_group
        .iter()
        .find(|s| s.segment == "Senior")
        .expect("senior segment present");
    assert_eq!(senior_stats.user_count, 1);
    assert_close(senior_stats.average_score, 100.0);
    assert!(report.by_age_group.iter().all(|s| s.segment != "Child"));
}

/// Deleting a simulation removes it from the catalog
#[tokio::test]
async fn test_admin_deletes_simulation() {
    let platform = TestPlatform::start().await.unwrap();
    let admin = platform.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert!(admin.access_token.is_some());

    let simulation = seeded_simulation(&platform).await;
    platform.state.simulations.delete(&simulation.id).await.unwrap();

    let err = platform.state.simulations.get(&simulation.id).await.unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(platform
        .state
        .simulations
        .delete(&SimulationId::new())
        .await
        .is_err());
}
