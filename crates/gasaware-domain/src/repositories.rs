//! Repository interfaces for data persistence
//!
//! These interfaces define the contracts for data access. Implementations
//! are provided by the persistence crate; the domain layer defines only
//! traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    entities::{AuditLog, Attempt, LoginAttempt, Score, SurveyResponse, User, VideoProgress},
    errors::DomainResult,
    value_objects::{SurveyId, UserId, VideoId},
};

/// Generic repository trait for common operations
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Insert or replace an entity
    async fn save(&self, entity: &T) -> DomainResult<()>;

    /// Find by ID
    async fn find_by_id(&self, id: &ID) -> DomainResult<Option<T>>;

    /// Find all entities
    async fn find_all(&self) -> DomainResult<Vec<T>>;

    /// Delete by ID, returning whether anything was removed
    async fn delete(&self, id: &ID) -> DomainResult<bool>;

    /// Check existence
    async fn exists(&self, id: &ID) -> DomainResult<bool>;
}

/// Account storage with the lookups authentication needs
#[async_trait]
pub trait UserRepository: Repository<User, UserId> {
    /// Find by normalized email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Find the account holding a pending verification token
    async fn find_by_verification_token(&self, token: &str) -> DomainResult<Option<User>>;

    /// Find the account holding a refresh token
    async fn find_by_refresh_token(&self, token: &str) -> DomainResult<Option<User>>;

    async fn count(&self) -> DomainResult<usize>;
}

/// Watch progress, one record per (user, video)
#[async_trait]
pub trait VideoProgressRepository: Send + Sync {
    async fn find(&self, user_id: &UserId, video_id: &VideoId)
        -> DomainResult<Option<VideoProgress>>;

    async fn find_by_user(&self, user_id: &UserId) -> DomainResult<Vec<VideoProgress>>;

    /// Insert or replace the record for its (user, video) pair
    async fn save(&self, progress: &VideoProgress) -> DomainResult<()>;

    /// Remove every record of a video, returning how many were removed
    async fn delete_by_video(&self, video_id: &VideoId) -> DomainResult<usize>;
}

/// Attempts and their score rows, written together
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn record(&self, attempt: &Attempt, score: &Score) -> DomainResult<()>;

    async fn find_all_attempts(&self) -> DomainResult<Vec<Attempt>>;

    /// Scores of one user, newest first
    async fn scores_for_user(&self, user_id: &UserId) -> DomainResult<Vec<Score>>;
}

#[async_trait]
pub trait SurveyResponseRepository: Send + Sync {
    async fn save_all(&self, responses: &[SurveyResponse]) -> DomainResult<()>;

    async fn find_by_survey(&self, survey_id: &SurveyId) -> DomainResult<Vec<SurveyResponse>>;
}

/// Login history used for lockout decisions
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    async fn record(&self, attempt: &LoginAttempt) -> DomainResult<()>;

    /// Failed attempts for `email` at or after `since`
    async fn count_failures_since(&self, email: &str, since: DateTime<Utc>)
        -> DomainResult<usize>;
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLog) -> DomainResult<()>;

    /// Up to `limit` entries, newest first
    async fn recent(&self, limit: usize) -> DomainResult<Vec<AuditLog>>;
}
