//! Video catalog

use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use gasaware_application::VideoDto;
use gasaware_domain::entities::VideoDraft;
use gasaware_domain::value_objects::VideoId;

use super::catalog_filter;
use crate::{
    error::ApiResult,
    extract::{AuthUser, Json, MaybeAuthUser, Path, Query},
    models::{ErrorResponse, VideoQuery},
    state::AppState,
};

/// Published videos visible to a segment
#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    params(VideoQuery),
    responses(
        (status = 200, description = "Videos in catalog order", body = [VideoDto])
    )
)]
pub async fn list_videos(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Query(query): Query<VideoQuery>,
) -> ApiResult<Json<Vec<VideoDto>>> {
    let filter = catalog_filter(
        &state,
        caller.as_ref(),
        query.age_group,
        query.subscription_type,
    )
    .await?;
    let videos = state.videos.list(filter, query.tag.as_deref()).await?;
    Ok(Json(videos))
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    tag = "videos",
    params(("id" = Uuid, Path, description = "Video id")),
    responses(
        (status = 200, description = "Video", body = VideoDto),
        (status = 404, description = "Unknown video", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<VideoDto>> {
    Ok(Json(state.videos.get(&VideoId::from(id)).await?))
}

/// Publish a video (Editor, Admin)
#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    security(("bearer_auth" = [])),
    request_body = VideoDraft,
    responses(
        (status = 201, description = "Video created", body = VideoDto),
        (status = 400, description = "Invalid video", body = ErrorResponse),
        (status = 403, description = "Editor or Admin role required", body = ErrorResponse)
    )
)]
pub async fn create_video(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(draft): Json<VideoDraft>,
) -> ApiResult<(StatusCode, Json<VideoDto>)> {
    caller.require_author()?;
    let video = state.videos.create(draft).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// Replace a video's content (Editor, Admin)
#[utoipa::path(
    put,
    path = "/api/videos/{id}",
    tag = "videos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Video id")),
    request_body = VideoDraft,
    responses(
        (status = 200, description = "Video updated", body = VideoDto),
        (status = 403, description = "Editor or Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown video", body = ErrorResponse)
    )
)]
pub async fn update_video(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<VideoDraft>,
) -> ApiResult<Json<VideoDto>> {
    caller.require_author()?;
    Ok(Json(state.videos.update(&VideoId::from(id), draft).await?))
}

/// Delete a video and its progress records (Admin)
#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    tag = "videos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Video id")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown video", body = ErrorResponse)
    )
)]
pub async fn delete_video(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;
    state.videos.delete(&VideoId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
