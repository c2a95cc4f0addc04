//! Shared fixtures for the workspace integration tests
//!
//! [`TestPlatform`] wires the full server state with in-memory storage, a
//! low bcrypt cost and a mailer that keeps every message, so tests can
//! follow verification links without a mail server.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use gasaware_api::{routes::build_router, seed::seed_demo_data, AppState};
use gasaware_application::{
    ApplicationError, ApplicationResult, AuthResponse, LoginRequest, RegisterRequest,
};
use gasaware_config::AppConfig;
use gasaware_domain::errors::DomainResult;
use gasaware_domain::ports::{MailMessage, Mailer};
use gasaware_domain::value_objects::SubscriptionType;

pub use gasaware_api::seed::{ADMIN_EMAIL, ADMIN_PASSWORD, USER_EMAIL, USER_PASSWORD};

/// Password used for accounts created by [`TestPlatform::register_verified`]
pub const TEST_PASSWORD: &str = "Sup3rSecret";

/// Mailer that keeps sent messages in memory
#[derive(Debug, Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl CapturingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().clone()
    }

    /// Verification token from the last message sent to `email`
    pub fn verification_token_for(&self, email: &str) -> Option<String> {
        let sent = self.sent.lock();
        let body = &sent.iter().rev().find(|m| m.to == email)?.body;
        let start = body.find("token=")? + "token=".len();
        Some(
            body[start..]
                .chars()
                .take_while(|c| !c.is_whitespace())
                .collect(),
        )
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, message: &MailMessage) -> DomainResult<()> {
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

/// Defaults with the cheapest bcrypt cost
pub fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = 4;
    config
}

/// Write `contents` to a temporary `.toml` file
pub fn write_config(contents: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("gasaware")
        .suffix(".toml")
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Fully wired server state
pub struct TestPlatform {
    pub state: AppState,
    pub mailer: Arc<CapturingMailer>,
}

impl TestPlatform {
    /// Seeded platform with [`fast_config`]
    pub async fn start() -> ApplicationResult<Self> {
        Self::with_config(fast_config(), true).await
    }

    pub async fn with_config(config: AppConfig, seed: bool) -> ApplicationResult<Self> {
        let mailer = Arc::new(CapturingMailer::default());
        let state = AppState::with_mailer(config, mailer.clone());
        if seed {
            seed_demo_data(&state)
                .await
                .map_err(|e| ApplicationError::ExternalServiceFailed(e.to_string()))?;
        }
        Ok(Self { state, mailer })
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> ApplicationResult<AuthResponse> {
        self.state
            .auth
            .login(
                LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                Some("127.0.0.1".to_string()),
            )
            .await
    }

    /// Register, follow the mailed verification link and sign in
    pub async fn register_verified(
        &self,
        email: &str,
        birth_date: NaiveDate,
        subscription_type: SubscriptionType,
    ) -> ApplicationResult<AuthResponse> {
        self.state
            .auth
            .register(RegisterRequest {
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                full_name: format!("Learner {email}"),
                birth_date,
                subscription_type,
            })
            .await?;

        let token = self.mailer.verification_token_for(email).ok_or_else(|| {
            ApplicationError::ExternalServiceFailed(format!("no verification mail for {email}"))
        })?;
        if !self.state.auth.verify_email(&token).await? {
            return Err(ApplicationError::ValidationFailed(format!(
                "verification failed for {email}"
            )));
        }
        self.sign_in(email, TEST_PASSWORD).await
    }
}
