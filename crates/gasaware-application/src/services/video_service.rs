//! Video catalog and watch progress

use std::sync::Arc;

use tracing::info;

use gasaware_domain::entities::{Video, VideoDraft, VideoProgress};
use gasaware_domain::repositories::{Repository, VideoProgressRepository};
use gasaware_domain::services::ContentFilter;
use gasaware_domain::value_objects::{UserId, VideoId};

use crate::dto::{UpdateProgressRequest, VideoDto, VideoProgressDto};
use crate::errors::{ApplicationError, ApplicationResult};

pub struct VideoService {
    videos: Arc<dyn Repository<Video, VideoId>>,
    progress: Arc<dyn VideoProgressRepository>,
}

impl VideoService {
    pub fn new(
        videos: Arc<dyn Repository<Video, VideoId>>,
        progress: Arc<dyn VideoProgressRepository>,
    ) -> Self {
        Self { videos, progress }
    }

    /// Published videos admitted by `filter`, optionally restricted to a tag
    pub async fn list(
        &self,
        filter: ContentFilter,
        tag: Option<&str>,
    ) -> ApplicationResult<Vec<VideoDto>> {
        let mut videos: Vec<Video> = self
            .videos
            .find_all()
            .await?
            .into_iter()
            .filter(|v| v.is_published && filter.admits_video(v))
            .filter(|v| tag.map_or(true, |t| v.has_tag(t)))
            .collect();
        videos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.title.cmp(&b.title)));
        Ok(videos.iter().map(VideoDto::from_domain).collect())
    }

    pub async fn get(&self, id: &VideoId) -> ApplicationResult<VideoDto> {
        Ok(VideoDto::from_domain(&self.load(id).await?))
    }

    pub async fn create(&self, draft: VideoDraft) -> ApplicationResult<VideoDto> {
        let video = Video::publish(draft)?;
        self.videos.save(&video).await?;
        info!(video_id = %video.id, title = %video.title, "Created video");
        Ok(VideoDto::from_domain(&video))
    }

    pub async fn update(&self, id: &VideoId, draft: VideoDraft) -> ApplicationResult<VideoDto> {
        let mut video = self.load(id).await?;
        video.apply(draft)?;
        self.videos.save(&video).await?;
        Ok(VideoDto::from_domain(&video))
    }

    /// Delete a video and every progress record pointing at it
    pub async fn delete(&self, id: &VideoId) -> ApplicationResult<()> {
        if !self.videos.delete(id).await? {
            return Err(ApplicationError::not_found("Video", id));
        }
        let removed = self.progress.delete_by_video(id).await?;
        info!(video_id = %id, removed_progress = removed, "Deleted video");
        Ok(())
    }

    async fn load(&self, id: &VideoId) -> ApplicationResult<Video> {
        self.videos
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Video", id))
    }
}

pub struct VideoProgressService {
    videos: Arc<dyn Repository<Video, VideoId>>,
    progress: Arc<dyn VideoProgressRepository>,
}

impl VideoProgressService {
    pub fn new(
        videos: Arc<dyn Repository<Video, VideoId>>,
        progress: Arc<dyn VideoProgressRepository>,
    ) -> Self {
        Self { videos, progress }
    }

    /// Progress of one user, most recently watched first
    pub async fn user_progress(
        &self,
        user_id: &UserId,
    ) -> ApplicationResult<Vec<VideoProgressDto>> {
        let records = self.progress.find_by_user(user_id).await?;
        let mut out = Vec::with_capacity(records.len());
        for record in &records {
            if let Some(video) = self.videos.find_by_id(&record.video_id).await? {
                out.push(VideoProgressDto::from_domain(record, video.title));
            }
        }
        Ok(out)
    }

    /// Upsert progress. A zero total falls back to the video duration.
    pub async fn update_progress(
        &self,
        user_id: &UserId,
        video_id: &VideoId,
        request: UpdateProgressRequest,
    ) -> ApplicationResult<VideoProgressDto> {
        let video = self
            .videos
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Video", video_id))?;

        let total = if request.total_seconds > 0 {
            request.total_seconds
        } else {
            video.duration_sec
        };

        let progress = match self.progress.find(user_id, video_id).await? {
            Some(mut existing) => {
                existing.record(request.watched_seconds, total);
                existing
            }
            None => VideoProgress::start(*user_id, *video_id, request.watched_seconds, total),
        };
        self.progress.save(&progress).await?;

        Ok(VideoProgressDto::from_domain(&progress, video.title))
    }
}
