//! Configuration files driving a running platform

use gasaware_config::{AppConfig, ConfigError, ConfigManager};
use gasaware_integration_tests::{write_config, TestPlatform, USER_EMAIL};
use gasaware_application::ApplicationError;

#[test]
fn test_file_overrides_defaults() {
    let file = write_config(
        r#"
[server]
port = 9090
cors_origins = ["https://gas.example"]

[auth]
bcrypt_cost = 4
lockout_threshold = 2

[scoring]
senior_multiplier = 1.5
"#,
    )
    .expect("Failed to write config");

    let config = ConfigManager::with_path(file.path())
        .env_prefix("GASAWARE_CONFIG_FILE_TEST")
        .load()
        .expect("Failed to load config");

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.cors_origins, vec!["https://gas.example"]);
    assert_eq!(config.auth.lockout_threshold, 2);
    assert_eq!(config.scoring.senior_multiplier, 1.5);
    assert_eq!(config.scoring.industrial_multiplier, 1.1);
    assert_eq!(config.jwt, AppConfig::default().jwt);
}

#[test]
fn test_invalid_file_is_rejected() {
    let file = write_config(
        r#"
[jwt]
secret = "too-short"
"#,
    )
    .unwrap();

    let err = ConfigManager::with_path(file.path())
        .env_prefix("GASAWARE_CONFIG_FILE_TEST")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

/// Lockout threshold from the file governs login attempts
#[tokio::test]
async fn test_lockout_threshold_from_file() {
    let file = write_config(
        r#"
[auth]
bcrypt_cost = 4
lockout_threshold = 2
lockout_window_minutes = 5
"#,
    )
    .unwrap();
    let config = ConfigManager::with_path(file.path())
        .env_prefix("GASAWARE_CONFIG_FILE_TEST")
        .load()
        .unwrap();

    let platform = TestPlatform::with_config(config, true).await.unwrap();
    for _ in 0..2 {
        let err = platform.sign_in(USER_EMAIL, "Wrong-pass1").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    let err = platform.sign_in(USER_EMAIL, "Wrong-pass1").await.unwrap_err();
    assert_eq!(
        err,
        ApplicationError::TooManyAttempts {
            retry_after_minutes: 5
        }
    );
}

/// Seeding can be turned off
#[tokio::test]
async fn test_unseeded_platform_is_empty() {
    let mut config = gasaware_integration_tests::fast_config();
    config.app.seed_demo_data = false;
    let platform = TestPlatform::with_config(config, false).await.unwrap();

    let report = platform.state.reports.summary().await.unwrap();
    assert_eq!(report.total_users, 0);
    assert!(report.by_age_group.is_empty());
}
