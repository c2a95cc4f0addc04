//! Instructional videos and per-user watch progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{require_text, Identified};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{AgeGroup, SubscriptionType, UserId, VideoId};

const MAX_TITLE_LEN: usize = 200;

/// Editable fields of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VideoDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub duration_sec: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_min_age")]
    pub min_age_group: AgeGroup,
    #[serde(default)]
    pub subscription_filter: Option<SubscriptionType>,
    #[serde(default)]
    pub thumbnail_url: String,
}

fn default_min_age() -> AgeGroup {
    AgeGroup::Child
}

impl VideoDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        if self.url.trim().is_empty() {
            return Err(DomainError::validation("url", "cannot be empty"));
        }
        Ok(())
    }

    fn normalized_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.iter().map(|t| t.trim().to_lowercase()) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

/// Published instructional video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub duration_sec: u32,
    pub tags: Vec<String>,
    pub min_age_group: AgeGroup,
    pub subscription_filter: Option<SubscriptionType>,
    pub is_published: bool,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Create a published video
    pub fn publish(draft: VideoDraft) -> DomainResult<Self> {
        draft.validate()?;
        let now = Utc::now();
        let tags = draft.normalized_tags();
        Ok(Self {
            id: VideoId::new(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            url: draft.url,
            duration_sec: draft.duration_sec,
            tags,
            min_age_group: draft.min_age_group,
            subscription_filter: draft.subscription_filter,
            is_published: true,
            thumbnail_url: draft.thumbnail_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the editable fields
    pub fn apply(&mut self, draft: VideoDraft) -> DomainResult<()> {
        draft.validate()?;
        self.tags = draft.normalized_tags();
        self.title = draft.title.trim().to_string();
        self.description = draft.description;
        self.url = draft.url;
        self.duration_sec = draft.duration_sec;
        self.min_age_group = draft.min_age_group;
        self.subscription_filter = draft.subscription_filter;
        self.thumbnail_url = draft.thumbnail_url;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.iter().any(|t| *t == tag)
    }
}

impl Identified for Video {
    type Id = VideoId;

    fn id(&self) -> VideoId {
        self.id
    }
}

/// Watch progress of one user on one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoProgress {
    pub user_id: UserId,
    pub video_id: VideoId,
    pub watched_seconds: u32,
    pub total_seconds: u32,
    pub progress_percent: f64,
    pub is_completed: bool,
    pub last_watched_at: DateTime<Utc>,
}

impl VideoProgress {
    /// Percentage at which a video counts as watched
    pub const COMPLETION_THRESHOLD: f64 = 90.0;

    /// First progress report for a video
    pub fn start(user_id: UserId, video_id: VideoId, watched: u32, total: u32) -> Self {
        let mut progress = Self {
            user_id,
            video_id,
            watched_seconds: 0,
            total_seconds: 0,
            progress_percent: 0.0,
            is_completed: false,
            last_watched_at: Utc::now(),
        };
        progress.record(watched, total);
        progress
    }

    /// Apply a progress report. `total` of zero yields zero percent.
    pub fn record(&mut self, watched: u32, total: u32) {
        let percent = if total > 0 {
            (f64::from(watched) / f64::from(total) * 100.0).min(100.0)
        } else {
            0.0
        };
        self.watched_seconds = watched;
        self.total_seconds = total;
        self.progress_percent = percent;
        self.is_completed = percent >= Self::COMPLETION_THRESHOLD;
        self.last_watched_at = Utc::now();
    }
}
