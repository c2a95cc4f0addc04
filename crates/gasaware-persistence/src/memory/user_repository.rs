//! In-memory user repository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use gasaware_domain::{
    entities::{normalize_email, User},
    errors::DomainResult,
    repositories::{Repository, UserRepository},
    value_objects::UserId,
};

use crate::error::PersistenceError;

/// Thread-safe in-memory implementation of UserRepository
///
/// Email addresses are unique (case-insensitive) across accounts.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_where(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users.read().values().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl Repository<User, UserId> for InMemoryUserRepository {
    async fn save(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.write();
        let email = normalize_email(&user.email);
        if users.values().any(|u| u.id != user.id && u.email == email) {
            debug!(email = %email, "Rejected duplicate email");
            return Err(PersistenceError::duplicate("User", format!("email {email}")).into());
        }

        let mut stored = user.clone();
        stored.email = email;
        users.insert(stored.id, stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.users.read().values().cloned().collect())
    }

    async fn delete(&self, id: &UserId) -> DomainResult<bool> {
        Ok(self.users.write().remove(id).is_some())
    }

    async fn exists(&self, id: &UserId) -> DomainResult<bool> {
        Ok(self.users.read().contains_key(id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email = normalize_email(email);
        Ok(self.find_where(|u| u.email == email))
    }

    async fn find_by_verification_token(&self, token: &str) -> DomainResult<Option<User>> {
        Ok(self.find_where(|u| u.verification.as_ref().is_some_and(|t| t.value == token)))
    }

    async fn find_by_refresh_token(&self, token: &str) -> DomainResult<Option<User>> {
        Ok(self.find_where(|u| u.refresh.as_ref().is_some_and(|t| t.value == token)))
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.users.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use gasaware_domain::entities::{ExpiringToken, UserProfile};
    use gasaware_domain::value_objects::SubscriptionType;
    use gasaware_domain::DomainError;

    fn user(email: &str) -> User {
        let profile = UserProfile::new(
            NaiveDate::from_ymd_opt(1985, 4, 2).unwrap(),
            SubscriptionType::Merkezi,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
        .unwrap();
        User::register(email, "hash".into(), "Test User", profile).unwrap()
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        repo.save(&user("mehmet@example.com")).await.unwrap();

        let found = repo.find_by_email("  MEHMET@example.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.save(&user("dup@example.com")).await.unwrap();

        let err = repo.save(&user("DUP@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEntity { .. }));
    }

    #[tokio::test]
    async fn test_resave_same_user_allowed() {
        let repo = InMemoryUserRepository::new();
        let mut u = user("same@example.com");
        repo.save(&u).await.unwrap();
        u.full_name = "Renamed".into();
        repo.save(&u).await.unwrap();
        assert_eq!(repo.find_by_id(&u.id).await.unwrap().unwrap().full_name, "Renamed");
    }

    #[tokio::test]
    async fn test_token_lookups() {
        let repo = InMemoryUserRepository::new();
        let mut u = user("tokens@example.com");
        let later = Utc::now() + Duration::hours(1);
        u.issue_verification(ExpiringToken::new("verify-1", later));
        u.rotate_refresh_token(ExpiringToken::new("refresh-1", later));
        repo.save(&u).await.unwrap();

        assert!(repo.find_by_verification_token("verify-1").await.unwrap().is_some());
        assert!(repo.find_by_refresh_token("refresh-1").await.unwrap().is_some());
        assert!(repo.find_by_refresh_token("verify-1").await.unwrap().is_none());
    }
}
