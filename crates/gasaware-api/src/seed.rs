//! Demo accounts and content for an empty store

use chrono::{NaiveDate, Utc};
use tracing::info;

use gasaware_application::ApplicationError;
use gasaware_domain::entities::{
    SimulationDraft, SimulationOptionDraft, SimulationQuestionDraft, SurveyDraft,
    SurveyOptionDraft, SurveyQuestionDraft, TargetingRuleDraft, User, UserProfile, VideoDraft,
};
use gasaware_domain::repositories::{Repository, UserRepository};
use gasaware_domain::value_objects::{
    AgeGroup, ModuleType, QuestionType, SubscriptionType, UserRole,
};
use gasaware_domain::DomainResult;

use crate::{error::ApiResult, state::AppState};

/// Seeded administrator
pub const ADMIN_EMAIL: &str = "admin@gasaware.local";
/// Password of [`ADMIN_EMAIL`]
pub const ADMIN_PASSWORD: &str = "Admin123!";
/// Seeded learner
pub const USER_EMAIL: &str = "user@gasaware.local";
/// Password of [`USER_EMAIL`]
pub const USER_PASSWORD: &str = "User1234!";

/// Seed demo data unless accounts already exist. Returns whether anything
/// was written.
pub async fn seed_demo_data(state: &AppState) -> ApiResult<bool> {
    if state.users.count().await.map_err(ApplicationError::from)? > 0 {
        info!("User store not empty, skipping demo data");
        return Ok(false);
    }

    seed_users(state).await.map_err(ApplicationError::from)?;

    for draft in videos() {
        state.videos.create(draft).await?;
    }
    state.simulations.create(leak_simulation()).await?;
    state.surveys.create(awareness_survey()).await?;
    for draft in targeting_rules() {
        state.rules.create(draft).await?;
    }

    info!("Seeded demo accounts and content");
    Ok(true)
}

async fn seed_users(state: &AppState) -> DomainResult<()> {
    let today = Utc::now().date_naive();
    let accounts = [
        (
            ADMIN_EMAIL,
            ADMIN_PASSWORD,
            "System Administrator",
            UserRole::Admin,
            date(1985, 1, 1),
        ),
        (
            USER_EMAIL,
            USER_PASSWORD,
            "Test User",
            UserRole::User,
            date(1990, 6, 15),
        ),
    ];

    for (email, password, name, role, birth_date) in accounts {
        let profile = UserProfile::new(birth_date, SubscriptionType::Bireysel, today)?;
        let mut user = User::register(email, state.hasher.hash(password)?, name, profile)?;
        user.role = role;
        user.email_verified = true;
        state.users.save(&user).await?;
    }
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn video(
    title: &str,
    description: &str,
    slug: &str,
    duration_sec: u32,
    tags: &[&str],
    min_age_group: AgeGroup,
    subscription_filter: Option<SubscriptionType>,
) -> VideoDraft {
    VideoDraft {
        title: title.to_string(),
        description: description.to_string(),
        url: format!("/videos/{slug}.mp4"),
        duration_sec,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        min_age_group,
        subscription_filter,
        thumbnail_url: format!("/thumbnails/{slug}.jpg"),
    }
}

fn videos() -> Vec<VideoDraft> {
    vec![
        video(
            "What Is Natural Gas?",
            "Basic properties of natural gas and where it is used.",
            "what-is-natural-gas",
            180,
            &["basics", "intro"],
            AgeGroup::Child,
            None,
        ),
        video(
            "How to Recognize a Gas Leak",
            "Signs of a gas leak and what to do next.",
            "leak-detection",
            240,
            &["safety", "leak"],
            AgeGroup::Adult,
            None,
        ),
        video(
            "Boiler Maintenance and Safety",
            "Everyday boiler use and periodic maintenance advice.",
            "boiler-maintenance",
            300,
            &["boiler", "maintenance", "safety"],
            AgeGroup::Adult,
            Some(SubscriptionType::Bireysel),
        ),
        video(
            "Industrial Gas Safety",
            "Natural gas in factories and the safety protocols that go with it.",
            "industrial-safety",
            420,
            &["industrial", "safety"],
            AgeGroup::Adult,
            Some(SubscriptionType::Endustriyel),
        ),
        video(
            "Gas Safety for Seniors",
            "Precautions for people aged 65 and over.",
            "senior-safety",
            200,
            &["senior", "safety"],
            AgeGroup::Senior,
            None,
        ),
    ]
}

fn option(text: &str, is_correct: bool, explanation: &str) -> SimulationOptionDraft {
    SimulationOptionDraft {
        text: text.to_string(),
        is_correct,
        explanation: Some(explanation.to_string()),
    }
}

fn leak_simulation() -> SimulationDraft {
    let question = |order: i32, text: &str, options: Vec<SimulationOptionDraft>| {
        SimulationQuestionDraft {
            text: text.to_string(),
            image_url: None,
            order,
            options,
        }
    };

    SimulationDraft {
        title: "Gas Leak at Home".to_string(),
        description: "Test what you would do when you smell gas at home.".to_string(),
        min_age_group: Some(AgeGroup::Adult),
        subscription_filter: None,
        questions: vec![
            question(
                1,
                "You smell gas at home. What should you do first?",
                vec![
                    option(
                        "Open the windows and ventilate",
                        true,
                        "Ventilating the room is the first step in a gas leak.",
                    ),
                    option(
                        "Switch on the light",
                        false,
                        "Electrical switches can create a spark.",
                    ),
                    option(
                        "Strike a match to check",
                        false,
                        "An open flame can cause an explosion.",
                    ),
                ],
            ),
            question(
                2,
                "Which of these must you not do when you suspect a leak?",
                vec![
                    option(
                        "Open the windows",
                        false,
                        "Ventilation is the right move.",
                    ),
                    option(
                        "Press a light switch",
                        true,
                        "Switches can spark and must not be touched.",
                    ),
                    option(
                        "Call 187",
                        false,
                        "The gas emergency line (187) should be called.",
                    ),
                ],
            ),
            question(
                3,
                "Which way do you turn a gas valve to close it?",
                vec![
                    option(
                        "Clockwise",
                        false,
                        "Turning clockwise opens the valve.",
                    ),
                    option(
                        "Counter-clockwise",
                        true,
                        "The valve closes when turned counter-clockwise.",
                    ),
                    option(
                        "Push it upward",
                        false,
                        "Gas valves use a turning mechanism.",
                    ),
                ],
            ),
        ],
    }
}

fn awareness_survey() -> SurveyDraft {
    let choice = |text: &str, value: i32| SurveyOptionDraft {
        text: text.to_string(),
        value,
    };

    SurveyDraft {
        title: "Gas Awareness Survey".to_string(),
        description: "Measure how much you know about gas safety.".to_string(),
        is_active: true,
        questions: vec![
            SurveyQuestionDraft {
                text: "Which number do you call for a gas leak?".to_string(),
                question_type: QuestionType::SingleChoice,
                weight: 20,
                order: 1,
                age_group_filter: None,
                subscription_filter: None,
                options: vec![
                    choice("110", 0),
                    choice("187", 100),
                    choice("112", 0),
                    choice("155", 0),
                ],
            },
            SurveyQuestionDraft {
                text: "Should a boiler be serviced every year?".to_string(),
                question_type: QuestionType::TrueFalse,
                weight: 15,
                order: 2,
                age_group_filter: None,
                subscription_filter: None,
                options: vec![choice("Yes", 100), choice("No", 0)],
            },
            SurveyQuestionDraft {
                text: "How would you rate your knowledge of gas safety?".to_string(),
                question_type: QuestionType::Scale,
                weight: 10,
                order: 3,
                age_group_filter: None,
                subscription_filter: None,
                options: Vec::new(),
            },
        ],
    }
}

fn targeting_rules() -> Vec<TargetingRuleDraft> {
    let rule = |module, age_group, subscription_type, score_multiplier, description: &str| {
        TargetingRuleDraft {
            module,
            reference_id: None,
            age_group,
            subscription_type,
            score_multiplier,
            is_active: true,
            description: description.to_string(),
        }
    };

    vec![
        rule(
            ModuleType::Simulation,
            Some(AgeGroup::Senior),
            None,
            1.2,
            "x1.2 on simulations for the 65+ age group",
        ),
        rule(
            ModuleType::Survey,
            Some(AgeGroup::Senior),
            None,
            1.2,
            "x1.2 on surveys for the 65+ age group",
        ),
        rule(
            ModuleType::Simulation,
            None,
            Some(SubscriptionType::Endustriyel),
            1.1,
            "x1.1 on simulations for industrial subscribers",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasaware_config::AppConfig;

    fn state() -> AppState {
        let mut config = AppConfig::default();
        config.auth.bcrypt_cost = 4;
        AppState::new(config)
    }

    #[test]
    fn test_seed_drafts_are_valid() {
        for draft in videos() {
            assert!(draft.validate().is_ok(), "{}", draft.title);
        }
        assert!(leak_simulation().validate().is_ok());
        assert!(awareness_survey().validate().is_ok());
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let state = state();
        assert!(seed_demo_data(&state).await.unwrap());
        assert!(!seed_demo_data(&state).await.unwrap());

        assert_eq!(state.users.count().await.unwrap(), 2);
        let admin = state.users.find_by_email(ADMIN_EMAIL).await.unwrap().unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.email_verified);
        assert_eq!(state.rules.list().await.unwrap().len(), 3);
    }
}
