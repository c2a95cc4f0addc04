//! User account and segment profile

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{require_text, Identified};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AgeGroup, SubscriptionType, UserId, UserRole};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;
/// Maximum length of a full name
pub const MAX_FULL_NAME_LEN: usize = 100;

/// Segment data attached to every account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub birth_date: NaiveDate,
    pub age_group: AgeGroup,
    pub subscription_type: SubscriptionType,
}

impl UserProfile {
    /// Build a profile, deriving the age group as of `today`
    pub fn new(
        birth_date: NaiveDate,
        subscription_type: SubscriptionType,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        if birth_date >= today {
            return Err(DomainError::validation("birth_date", "must be in the past"));
        }
        Ok(Self {
            birth_date,
            age_group: AgeGroup::from_birth_date(birth_date, today),
            subscription_type,
        })
    }

    /// Recompute the age group; returns true when it changed
    pub fn refresh_age_group(&mut self, today: NaiveDate) -> bool {
        let current = AgeGroup::from_birth_date(self.birth_date, today);
        let changed = current != self.age_group;
        self.age_group = current;
        changed
    }
}

/// Opaque token with an expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl ExpiringToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Result of presenting an email verification token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
    Expired,
    Mismatch,
}

impl VerificationOutcome {
    /// Whether the account ends up verified
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Verified | Self::AlreadyVerified)
    }
}

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub verification: Option<ExpiringToken>,
    pub refresh: Option<ExpiringToken>,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an unverified account with the `User` role
    pub fn register(
        email: &str,
        password_hash: String,
        full_name: &str,
        profile: UserProfile,
    ) -> DomainResult<Self> {
        let email = normalize_email(email);
        validate_email(&email)?;
        require_text("full_name", full_name, MAX_FULL_NAME_LEN)?;

        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            email,
            password_hash,
            full_name: full_name.trim().to_string(),
            role: UserRole::User,
            email_verified: false,
            verification: None,
            refresh: None,
            profile,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the pending verification token
    pub fn issue_verification(&mut self, token: ExpiringToken) {
        self.verification = Some(token);
        self.updated_at = Utc::now();
    }

    /// Present a verification token
    pub fn confirm_email(&mut self, token: &str, now: DateTime<Utc>) -> VerificationOutcome {
        if self.email_verified {
            return VerificationOutcome::AlreadyVerified;
        }
        match &self.verification {
            Some(pending) if pending.value == token => {
                if pending.is_expired(now) {
                    return VerificationOutcome::Expired;
                }
                self.email_verified = true;
                self.verification = None;
                self.updated_at = now;
                VerificationOutcome::Verified
            }
            _ => VerificationOutcome::Mismatch,
        }
    }

    /// Store a freshly issued refresh token, replacing any previous one
    pub fn rotate_refresh_token(&mut self, token: ExpiringToken) {
        self.refresh = Some(token);
        self.updated_at = Utc::now();
    }

    /// Whether `token` is the live refresh token of this account
    pub fn accepts_refresh_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.refresh
            .as_ref()
            .is_some_and(|r| r.value == token && !r.is_expired(now))
    }

    pub fn age_group(&self) -> AgeGroup {
        self.profile.age_group
    }

    pub fn subscription_type(&self) -> SubscriptionType {
        self.profile.subscription_type
    }
}

impl Identified for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> DomainResult<()> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    });

    if email.trim().is_empty() {
        return Err(DomainError::validation("email", "is required"));
    }
    if !re.is_match(email.trim()) {
        return Err(DomainError::validation("email", "invalid email format"));
    }
    Ok(())
}

/// Password policy: length, upper case, lower case and digit
pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(DomainError::validation(
            "password",
            "must contain an upper case letter",
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(DomainError::validation(
            "password",
            "must contain a lower case letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::validation("password", "must contain a digit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile() -> UserProfile {
        UserProfile::new(
            NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            SubscriptionType::Bireysel,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn user() -> User {
        User::register(" Ayse@Example.com ", "hash".into(), "Ayse Yilmaz", profile()).unwrap()
    }

    #[test]
    fn test_register_normalizes_email() {
        let user = user();
        assert_eq!(user.email, "ayse@example.com");
        assert!(!user.email_verified);
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.age_group(), AgeGroup::Adult);
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let err = User::register("nope", "hash".into(), "Name", profile()).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError { ref field, .. } if field == "email"));
    }

    #[test]
    fn test_profile_rejects_future_birth_date() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(UserProfile::new(today, SubscriptionType::Merkezi, today).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Short1").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
        assert!(validate_password("Valid1234").is_ok());
    }

    #[test]
    fn test_confirm_email_transitions() {
        let now = Utc::now();
        let mut user = user();
        user.issue_verification(ExpiringToken::new("tok", now + Duration::hours(1)));

        assert_eq!(user.confirm_email("other", now), VerificationOutcome::Mismatch);
        assert_eq!(user.confirm_email("tok", now), VerificationOutcome::Verified);
        assert!(user.email_verified);
        assert!(user.verification.is_none());
        assert_eq!(user.confirm_email("tok", now), VerificationOutcome::AlreadyVerified);
    }

    #[test]
    fn test_confirm_email_expired() {
        let now = Utc::now();
        let mut user = user();
        user.issue_verification(ExpiringToken::new("tok", now - Duration::minutes(1)));
        assert_eq!(user.confirm_email("tok", now), VerificationOutcome::Expired);
        assert!(!user.email_verified);
    }

    #[test]
    fn test_refresh_token_acceptance() {
        let now = Utc::now();
        let mut user = user();
        assert!(!user.accepts_refresh_token("r1", now));
        user.rotate_refresh_token(ExpiringToken::new("r1", now + Duration::days(1)));
        assert!(user.accepts_refresh_token("r1", now));
        assert!(!user.accepts_refresh_token("r2", now));
        assert!(!user.accepts_refresh_token("r1", now + Duration::days(2)));
    }

    #[test]
    fn test_refresh_age_group() {
        let mut p = profile();
        let later = NaiveDate::from_ymd_opt(2056, 7, 1).unwrap();
        assert!(p.refresh_age_group(later));
        assert_eq!(p.age_group, AgeGroup::Senior);
        assert!(!p.refresh_age_group(later));
    }
}
