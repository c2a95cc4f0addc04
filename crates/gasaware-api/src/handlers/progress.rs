//! Per-user video watch progress

use axum::extract::State;
use uuid::Uuid;

use gasaware_application::{UpdateProgressRequest, VideoProgressDto};
use gasaware_domain::value_objects::VideoId;

use crate::{
    error::ApiResult,
    extract::{AuthUser, Json, Path},
    models::ErrorResponse,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/video-progress",
    tag = "videos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's progress, most recent first", body = [VideoProgressDto])
    )
)]
pub async fn list_progress(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<Vec<VideoProgressDto>>> {
    Ok(Json(state.progress.user_progress(&caller.user_id).await?))
}

/// Record how far the caller has watched a video
#[utoipa::path(
    put,
    path = "/api/video-progress/{video_id}",
    tag = "videos",
    security(("bearer_auth" = [])),
    params(("video_id" = Uuid, Path, description = "Video id")),
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Progress stored", body = VideoProgressDto),
        (status = 404, description = "Unknown video", body = ErrorResponse)
    )
)]
pub async fn update_progress(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(video_id): Path<Uuid>,
    Json(request): Json<UpdateProgressRequest>,
) -> ApiResult<Json<VideoProgressDto>> {
    let progress = state
        .progress
        .update_progress(&caller.user_id, &VideoId::from(video_id), request)
        .await?;
    Ok(Json(progress))
}
