//! Survey catalog, responses and authoring

use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use gasaware_application::{SurveyDetailDto, SurveyResultDto, SurveySubmission, SurveySummaryDto};
use gasaware_domain::entities::SurveyDraft;
use gasaware_domain::services::ContentFilter;
use gasaware_domain::value_objects::SurveyId;

use crate::{
    error::ApiResult,
    extract::{AuthUser, Json, Path, Query},
    models::{CatalogQuery, ErrorResponse},
    state::AppState,
};

/// Active surveys. Query filters keep those with a question for the segment.
#[utoipa::path(
    get,
    path = "/api/surveys/active",
    tag = "surveys",
    security(("bearer_auth" = [])),
    params(CatalogQuery),
    responses(
        (status = 200, description = "Active surveys", body = [SurveySummaryDto]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn list_active_surveys(
    State(state): State<AppState>,
    _caller: AuthUser,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<Vec<SurveySummaryDto>>> {
    let filter = ContentFilter::new(query.age_group, query.subscription_type);
    Ok(Json(state.surveys.list_active(filter).await?))
}

/// Respondent view: option values are withheld
#[utoipa::path(
    get,
    path = "/api/surveys/{id}",
    tag = "surveys",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Survey id")),
    responses(
        (status = 200, description = "Survey", body = SurveyDetailDto),
        (status = 404, description = "Unknown survey", body = ErrorResponse)
    )
)]
pub async fn get_survey(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SurveyDetailDto>> {
    Ok(Json(state.surveys.get(&SurveyId::from(id)).await?))
}

/// Store answers and record a weighted score
#[utoipa::path(
    post,
    path = "/api/surveys/{id}/responses",
    tag = "surveys",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Survey id")),
    request_body = SurveySubmission,
    responses(
        (status = 200, description = "Responses recorded", body = SurveyResultDto),
        (status = 400, description = "Inactive survey or invalid answer", body = ErrorResponse),
        (status = 404, description = "Unknown survey", body = ErrorResponse)
    )
)]
pub async fn submit_responses(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(submission): Json<SurveySubmission>,
) -> ApiResult<Json<SurveyResultDto>> {
    let result = state
        .surveys
        .submit(&caller.user_id, &SurveyId::from(id), submission)
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/surveys",
    tag = "surveys",
    security(("bearer_auth" = [])),
    request_body = SurveyDraft,
    responses(
        (status = 201, description = "Survey created", body = SurveyDetailDto),
        (status = 400, description = "Invalid survey", body = ErrorResponse),
        (status = 403, description = "Editor or Admin role required", body = ErrorResponse)
    )
)]
pub async fn create_survey(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(draft): Json<SurveyDraft>,
) -> ApiResult<(StatusCode, Json<SurveyDetailDto>)> {
    caller.require_author()?;
    let survey = state.surveys.create(draft).await?;
    Ok((StatusCode::CREATED, Json(survey)))
}

#[utoipa::path(
    put,
    path = "/api/surveys/{id}",
    tag = "surveys",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Survey id")),
    request_body = SurveyDraft,
    responses(
        (status = 200, description = "Survey updated", body = SurveyDetailDto),
        (status = 403, description = "Editor or Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown survey", body = ErrorResponse)
    )
)]
pub async fn update_survey(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<SurveyDraft>,
) -> ApiResult<Json<SurveyDetailDto>> {
    caller.require_author()?;
    Ok(Json(state.surveys.update(&SurveyId::from(id), draft).await?))
}

#[utoipa::path(
    delete,
    path = "/api/surveys/{id}",
    tag = "surveys",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Survey id")),
    responses(
        (status = 204, description = "Survey deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown survey", body = ErrorResponse)
    )
)]
pub async fn delete_survey(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;
    state.surveys.delete(&SurveyId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
