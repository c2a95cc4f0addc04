//! Admin management of content targeting rules

use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use gasaware_application::TargetingRuleDto;
use gasaware_domain::entities::TargetingRuleDraft;
use gasaware_domain::value_objects::RuleId;

use crate::{
    error::ApiResult,
    extract::{Json, Path},
    models::ErrorResponse,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/admin/content-targeting-rules",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All rules, newest first", body = [TargetingRuleDto]),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    )
)]
pub async fn list_rules(State(state): State<AppState>) -> ApiResult<Json<Vec<TargetingRuleDto>>> {
    Ok(Json(state.rules.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/content-targeting-rules/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rule id")),
    responses(
        (status = 200, description = "Rule", body = TargetingRuleDto),
        (status = 404, description = "Unknown rule", body = ErrorResponse)
    )
)]
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TargetingRuleDto>> {
    Ok(Json(state.rules.get(&RuleId::from(id)).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/content-targeting-rules",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = TargetingRuleDraft,
    responses(
        (status = 201, description = "Rule created", body = TargetingRuleDto),
        (status = 400, description = "Multiplier out of range", body = ErrorResponse)
    )
)]
pub async fn create_rule(
    State(state): State<AppState>,
    Json(draft): Json<TargetingRuleDraft>,
) -> ApiResult<(StatusCode, Json<TargetingRuleDto>)> {
    let rule = state.rules.create(draft).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

#[utoipa::path(
    put,
    path = "/api/admin/content-targeting-rules/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rule id")),
    request_body = TargetingRuleDraft,
    responses(
        (status = 200, description = "Rule updated", body = TargetingRuleDto),
        (status = 404, description = "Unknown rule", body = ErrorResponse)
    )
)]
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TargetingRuleDraft>,
) -> ApiResult<Json<TargetingRuleDto>> {
    Ok(Json(state.rules.update(&RuleId::from(id), draft).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/content-targeting-rules/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Rule id")),
    responses(
        (status = 204, description = "Rule deleted"),
        (status = 404, description = "Unknown rule", body = ErrorResponse)
    )
)]
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.rules.delete(&RuleId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
