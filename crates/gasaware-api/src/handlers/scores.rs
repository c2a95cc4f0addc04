//! Score history

use axum::extract::State;

use gasaware_application::ScoreDto;

use crate::{
    error::ApiResult,
    extract::{AuthUser, Json},
    state::AppState,
};

/// Caller's scores, newest first
#[utoipa::path(
    get,
    path = "/api/scores/me",
    tag = "scores",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Score history", body = [ScoreDto])
    )
)]
pub async fn my_scores(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<Vec<ScoreDto>>> {
    Ok(Json(state.scoring.scores_for(&caller.user_id).await?))
}
