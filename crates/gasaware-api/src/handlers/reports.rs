//! Admin reports

use axum::extract::State;

use gasaware_application::ReportSummaryDto;

use crate::{error::ApiResult, extract::Json, state::AppState};

/// Totals and per-segment averages
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Report summary", body = ReportSummaryDto)
    )
)]
pub async fn summary(State(state): State<AppState>) -> ApiResult<Json<ReportSummaryDto>> {
    Ok(Json(state.reports.summary().await?))
}

/// Same report as the summary, kept for clients that ask by segment
#[utoipa::path(
    get,
    path = "/api/reports/by-segment",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Report summary", body = ReportSummaryDto)
    )
)]
pub async fn by_segment(State(state): State<AppState>) -> ApiResult<Json<ReportSummaryDto>> {
    summary(State(state)).await
}
