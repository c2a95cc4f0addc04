use std::io::Write;

use gasaware_config::*;
use proptest::prelude::*;
use tempfile::TempDir;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.auth.lockout_threshold, 5);
    assert_eq!(config.auth.lockout_window_minutes, 15);
    assert_eq!(config.rate_limit.permits, 100);
    assert_eq!(config.rate_limit.window_seconds, 60);
    assert_eq!(config.scoring.senior_multiplier, 1.2);
    assert_eq!(config.scoring.industrial_multiplier, 1.1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::new();

    let mut config = AppConfig::default();
    config.jwt.secret = "short".into();
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.server.port = 0;
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = 3;
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.scoring.industrial_multiplier = 0.0;
    assert!(manager.validate_config(&config).is_err());

    let mut config = AppConfig::default();
    config.rate_limit.permits = 0;
    assert!(manager.validate_config(&config).is_err());
}

#[test]
fn test_trusted_proxies_must_be_ip_addresses() {
    let mut config = AppConfig::default();
    assert!(config.server.trusted_proxy_addrs().is_empty());

    config.server.trusted_proxies = vec!["10.0.0.1".into(), " ::1 ".into()];
    assert!(config.validate().is_ok());
    assert_eq!(config.server.trusted_proxy_addrs().len(), 2);

    config.server.trusted_proxies.push("proxy.internal".into());
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_load_without_file_uses_defaults() {
    let mut manager = ConfigManager::with_path("/nonexistent/gasaware.toml")
        .env_prefix("GASAWARE_TEST_DEFAULTS");
    let config = manager.load().unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_load_partial_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9090

[scoring]
senior_multiplier = 1.5
"#
    )
    .unwrap();

    let mut manager = ConfigManager::with_path(file.path()).env_prefix("GASAWARE_TEST_FILE");
    let config = manager.load().unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.scoring.senior_multiplier, 1.5);
    assert_eq!(config.scoring.industrial_multiplier, 1.1);
}

#[test]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[rate_limit]\npermits = 10").unwrap();

    std::env::set_var("GASAWARE_TEST_ENV__RATE_LIMIT__PERMITS", "25");
    std::env::set_var("GASAWARE_TEST_ENV__LOGGING__JSON", "true");
    let mut manager = ConfigManager::with_path(file.path()).env_prefix("GASAWARE_TEST_ENV");
    let config = manager.load().unwrap();
    std::env::remove_var("GASAWARE_TEST_ENV__RATE_LIMIT__PERMITS");
    std::env::remove_var("GASAWARE_TEST_ENV__LOGGING__JSON");

    assert_eq!(config.rate_limit.permits, 25);
    assert!(config.logging.json);
}

#[test]
fn test_invalid_file_values_fail_load() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[auth]\nbcrypt_cost = 40").unwrap();

    let mut manager = ConfigManager::with_path(file.path()).env_prefix("GASAWARE_TEST_INVALID");
    let err = manager.load().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("gasaware.toml");
    let mut manager = ConfigManager::with_path(&path).env_prefix("GASAWARE_TEST_SAVE");

    let mut config = AppConfig::default();
    config.app.seed_demo_data = false;
    config.server.cors_origins = vec!["https://a.example".into(), "https://b.example".into()];
    manager.save_config(&config).unwrap();

    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn test_save_without_path_fails() {
    let manager = ConfigManager::new();
    assert!(manager.save_config(&AppConfig::default()).is_err());
}

proptest! {
    /// Any bcrypt cost outside 4..=31 is rejected, any inside is accepted
    #[test]
    fn test_bcrypt_cost_bounds(cost in 0u32..64) {
        let mut config = AppConfig::default();
        config.auth.bcrypt_cost = cost;
        prop_assert_eq!(config.validate().is_ok(), (4..=31).contains(&cost));
    }
}
