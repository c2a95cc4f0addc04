//! Registration, login and token lifecycle
//!
//! Login is locked for an email once the failed attempts inside the lockout
//! window reach the threshold. Verification mail goes out through the
//! [`Mailer`] port; a failed delivery during registration is logged and the
//! account is still created.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::task;
use tracing::{debug, info, warn};

use gasaware_domain::entities::{
    normalize_email, validate_email, validate_password, ExpiringToken, LoginAttempt, User,
    UserProfile,
};
use gasaware_domain::ports::{MailMessage, Mailer, PasswordHasher, TokenIssuer, TokenSubject};
use gasaware_domain::repositories::{LoginAttemptRepository, Repository, UserRepository};
use gasaware_domain::value_objects::UserId;

use crate::dto::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, ResendVerificationRequest,
    UserProfileDto,
};
use crate::errors::{ApplicationError, ApplicationResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Token lifetimes and lockout policy
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub lockout_threshold: u32,
    pub lockout_window: Duration,
    pub verification_ttl: Duration,
    pub refresh_ttl: Duration,
    /// Prefix of the verification link sent by mail
    pub public_base_url: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            lockout_threshold: 5,
            lockout_window: Duration::minutes(15),
            verification_ttl: Duration::hours(24),
            refresh_ttl: Duration::days(7),
            public_base_url: "http://localhost:8080".to_string(),
        }
    }
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    login_attempts: Arc<dyn LoginAttemptRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    mailer: Arc<dyn Mailer>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        login_attempts: Arc<dyn LoginAttemptRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        mailer: Arc<dyn Mailer>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            login_attempts,
            hasher,
            tokens,
            mailer,
            settings,
        }
    }

    /// Create an unverified account and mail its verification link
    pub async fn register(&self, request: RegisterRequest) -> ApplicationResult<AuthResponse> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_password(&request.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::Conflict(format!(
                "An account already exists for {email}"
            )));
        }

        let now = Utc::now();
        let profile = UserProfile::new(
            request.birth_date,
            request.subscription_type,
            now.date_naive(),
        )?;
        let password_hash = self.hash_password(&request.password).await?;
        let mut user = User::register(&email, password_hash, &request.full_name, profile)?;

        let token = self.tokens.new_verification_token();
        user.issue_verification(ExpiringToken::new(
            token.clone(),
            now + self.settings.verification_ttl,
        ));
        self.users.save(&user).await?;
        info!(user_id = %user.id, age_group = ?user.age_group(), "Registered user");

        if let Err(e) = self.send_verification(&user, &token).await {
            warn!(user_id = %user.id, error = %e, "Verification mail could not be sent");
        }

        Ok(AuthResponse::account_only(&user))
    }

    /// Password login. `ip_address` is kept with the attempt record.
    pub async fn login(
        &self,
        request: LoginRequest,
        ip_address: Option<String>,
    ) -> ApplicationResult<AuthResponse> {
        let email = normalize_email(&request.email);
        let now = Utc::now();

        let failures = self
            .login_attempts
            .count_failures_since(&email, now - self.settings.lockout_window)
            .await?;
        if failures >= self.settings.lockout_threshold as usize {
            warn!(email = %email, failures, "Login locked out");
            return Err(ApplicationError::TooManyAttempts {
                retry_after_minutes: self.settings.lockout_window.num_minutes().max(1) as u32,
            });
        }

        let candidate = self.users.find_by_email(&email).await?;
        let password_ok = match &candidate {
            Some(user) => {
                self.verify_password(&request.password, &user.password_hash)
                    .await?
            }
            None => false,
        };
        let user = match candidate {
            Some(user) if password_ok => user,
            _ => {
                self.login_attempts
                    .record(&LoginAttempt::new(email.clone(), ip_address, false))
                    .await?;
                debug!(email = %email, "Rejected login");
                return Err(ApplicationError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !user.email_verified {
            return Err(ApplicationError::EmailNotVerified);
        }

        self.login_attempts
            .record(&LoginAttempt::new(email, ip_address, true))
            .await?;

        let mut user = user;
        if user.profile.refresh_age_group(now.date_naive()) {
            info!(user_id = %user.id, age_group = ?user.age_group(), "Age group changed");
        }
        self.sign_in(user).await
    }

    /// Exchange a live refresh token for a new token pair
    pub async fn refresh(&self, request: RefreshRequest) -> ApplicationResult<AuthResponse> {
        let now = Utc::now();
        let user = self
            .users
            .find_by_refresh_token(&request.refresh_token)
            .await?
            .filter(|u| u.accepts_refresh_token(&request.refresh_token, now))
            .ok_or_else(|| {
                ApplicationError::Unauthorized("Invalid or expired refresh token".to_string())
            })?;

        self.sign_in(user).await
    }

    /// Whether `token` verified an account (or it already was)
    pub async fn verify_email(&self, token: &str) -> ApplicationResult<bool> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApplicationError::ValidationFailed(
                "verification token is required".to_string(),
            ));
        }

        let Some(mut user) = self.users.find_by_verification_token(token).await? else {
            return Ok(false);
        };

        let outcome = user.confirm_email(token, Utc::now());
        if outcome.is_success() {
            self.users.save(&user).await?;
            info!(user_id = %user.id, "Email verified");
        } else {
            debug!(user_id = %user.id, outcome = ?outcome, "Verification rejected");
        }
        Ok(outcome.is_success())
    }

    /// Issue a fresh verification token and mail it again
    pub async fn resend_verification(
        &self,
        request: ResendVerificationRequest,
    ) -> ApplicationResult<()> {
        let email = normalize_email(&request.email);
        let mut user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            ApplicationError::ValidationFailed("No account is registered for this email".into())
        })?;
        if user.email_verified {
            return Err(ApplicationError::ValidationFailed(
                "Email address is already verified".into(),
            ));
        }

        let token = self.tokens.new_verification_token();
        user.issue_verification(ExpiringToken::new(
            token.clone(),
            Utc::now() + self.settings.verification_ttl,
        ));
        self.users.save(&user).await?;
        self.send_verification(&user, &token).await?;
        Ok(())
    }

    pub async fn profile(&self, user_id: &UserId) -> ApplicationResult<UserProfileDto> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", user_id))?;
        Ok(UserProfileDto::from_domain(&user))
    }

    /// Check an access token presented by a client
    pub fn authenticate(&self, access_token: &str) -> ApplicationResult<TokenSubject> {
        Ok(self.tokens.verify_access_token(access_token)?)
    }

    async fn sign_in(&self, mut user: User) -> ApplicationResult<AuthResponse> {
        let access = self.tokens.issue_access_token(&user)?;
        let refresh_token = self.tokens.new_refresh_token();
        user.rotate_refresh_token(ExpiringToken::new(
            refresh_token.clone(),
            Utc::now() + self.settings.refresh_ttl,
        ));
        self.users.save(&user).await?;
        Ok(AuthResponse::signed_in(&user, access, refresh_token))
    }

    // bcrypt runs on the blocking pool so a slow cost factor does not stall
    // the async workers.
    async fn hash_password(&self, password: &str) -> ApplicationResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hashed = task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(blocking_failed)?;
        Ok(hashed?)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> ApplicationResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let (password, hash) = (password.to_owned(), hash.to_owned());
        let matches = task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(blocking_failed)?;
        Ok(matches?)
    }

    async fn send_verification(&self, user: &User, token: &str) -> ApplicationResult<()> {
        let link = format!(
            "{}/api/auth/verify-email?token={token}",
            self.settings.public_base_url.trim_end_matches('/')
        );
        let message = MailMessage {
            to: user.email.clone(),
            subject: "Verify your email address".to_string(),
            body: format!(
                "Hello {},\n\nConfirm your email address by opening the link below. \
                 It expires in {} hours.\n\n{link}\n",
                user.full_name,
                self.settings.verification_ttl.num_hours()
            ),
        };
        Ok(self.mailer.send(&message).await?)
    }
}

fn blocking_failed(err: task::JoinError) -> ApplicationError {
    ApplicationError::ExternalServiceFailed(format!("password hashing task failed: {err}"))
}
