//! In-memory video progress repository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use gasaware_domain::{
    entities::VideoProgress,
    errors::DomainResult,
    repositories::VideoProgressRepository,
    value_objects::{UserId, VideoId},
};

/// Progress records keyed by (user, video)
#[derive(Debug, Default)]
pub struct InMemoryVideoProgressRepository {
    records: RwLock<HashMap<(UserId, VideoId), VideoProgress>>,
}

impl InMemoryVideoProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoProgressRepository for InMemoryVideoProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        video_id: &VideoId,
    ) -> DomainResult<Option<VideoProgress>> {
        Ok(self.records.read().get(&(*user_id, *video_id)).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> DomainResult<Vec<VideoProgress>> {
        let mut records: Vec<VideoProgress> = self
            .records
            .read()
            .values()
            .filter(|p| p.user_id == *user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.last_watched_at.cmp(&a.last_watched_at));
        Ok(records)
    }

    async fn save(&self, progress: &VideoProgress) -> DomainResult<()> {
        self.records
            .write()
            .insert((progress.user_id, progress.video_id), progress.clone());
        Ok(())
    }

    async fn delete_by_video(&self, video_id: &VideoId) -> DomainResult<usize> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|(_, video), _| video != video_id);
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_is_upsert_per_pair() {
        let repo = InMemoryVideoProgressRepository::new();
        let user = UserId::new();
        let video = VideoId::new();

        repo.save(&VideoProgress::start(user, video, 10, 100)).await.unwrap();
        repo.save(&VideoProgress::start(user, video, 95, 100)).await.unwrap();

        let records = repo.find_by_user(&user).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_completed);
    }

    #[tokio::test]
    async fn test_delete_by_video_cascades_across_users() {
        let repo = InMemoryVideoProgressRepository::new();
        let video = VideoId::new();
        let other = VideoId::new();
        let (a, b) = (UserId::new(), UserId::new());

        repo.save(&VideoProgress::start(a, video, 1, 10)).await.unwrap();
        repo.save(&VideoProgress::start(b, video, 1, 10)).await.unwrap();
        repo.save(&VideoProgress::start(a, other, 1, 10)).await.unwrap();

        assert_eq!(repo.delete_by_video(&video).await.unwrap(), 2);
        assert!(repo.find(&a, &video).await.unwrap().is_none());
        assert!(repo.find(&a, &other).await.unwrap().is_some());
    }
}
