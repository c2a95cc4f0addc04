//! Simulation catalog, runs and authoring

use axum::{extract::State, http::StatusCode};
use uuid::Uuid;

use gasaware_application::{
    SimulationDetailDto, SimulationResultDto, SimulationSubmission, SimulationSummaryDto,
};
use gasaware_domain::entities::SimulationDraft;
use gasaware_domain::value_objects::SimulationId;

use super::catalog_filter;
use crate::{
    error::ApiResult,
    extract::{AuthUser, Json, MaybeAuthUser, Path, Query},
    models::{CatalogQuery, ErrorResponse},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/simulations",
    tag = "simulations",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Published simulations visible to the segment", body = [SimulationSummaryDto])
    )
)]
pub async fn list_simulations(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<Vec<SimulationSummaryDto>>> {
    let filter = catalog_filter(
        &state,
        caller.as_ref(),
        query.age_group,
        query.subscription_type,
    )
    .await?;
    Ok(Json(state.simulations.list(filter).await?))
}

/// Learner view: answer correctness and explanations are withheld
#[utoipa::path(
    get,
    path = "/api/simulations/{id}",
    tag = "simulations",
    params(("id" = Uuid, Path, description = "Simulation id")),
    responses(
        (status = 200, description = "Simulation", body = SimulationDetailDto),
        (status = 404, description = "Unknown simulation", body = ErrorResponse)
    )
)]
pub async fn get_simulation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SimulationDetailDto>> {
    Ok(Json(state.simulations.get(&SimulationId::from(id)).await?))
}

/// Score a run and record the attempt
#[utoipa::path(
    post,
    path = "/api/simulations/{id}/answers",
    tag = "simulations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Simulation id")),
    request_body = SimulationSubmission,
    responses(
        (status = 200, description = "Scored run with per-question feedback", body = SimulationResultDto),
        (status = 404, description = "Unknown simulation", body = ErrorResponse)
    )
)]
pub async fn submit_answers(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(submission): Json<SimulationSubmission>,
) -> ApiResult<Json<SimulationResultDto>> {
    let result = state
        .simulations
        .submit(&caller.user_id, &SimulationId::from(id), submission)
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/simulations",
    tag = "simulations",
    security(("bearer_auth" = [])),
    request_body = SimulationDraft,
    responses(
        (status = 201, description = "Simulation created", body = SimulationDetailDto),
        (status = 400, description = "Invalid simulation", body = ErrorResponse),
        (status = 403, description = "Editor or Admin role required", body = ErrorResponse)
    )
)]
pub async fn create_simulation(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(draft): Json<SimulationDraft>,
) -> ApiResult<(StatusCode, Json<SimulationDetailDto>)> {
    caller.require_author()?;
    let simulation = state.simulations.create(draft).await?;
    Ok((StatusCode::CREATED, Json(simulation)))
}

#[utoipa::path(
    put,
    path = "/api/simulations/{id}",
    tag = "simulations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Simulation id")),
    request_body = SimulationDraft,
    responses(
        (status = 200, description = "Simulation updated", body = SimulationDetailDto),
        (status = 403, description = "Editor or Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown simulation", body = ErrorResponse)
    )
)]
pub async fn update_simulation(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<SimulationDraft>,
) -> ApiResult<Json<SimulationDetailDto>> {
    caller.require_author()?;
    let simulation = state
        .simulations
        .update(&SimulationId::from(id), draft)
        .await?;
    Ok(Json(simulation))
}

#[utoipa::path(
    delete,
    path = "/api/simulations/{id}",
    tag = "simulations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Simulation id")),
    responses(
        (status = 204, description = "Simulation deleted"),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown simulation", body = ErrorResponse)
    )
)]
pub async fn delete_simulation(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;
    state.simulations.delete(&SimulationId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
