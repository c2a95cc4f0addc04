//! Audit log listing

use axum::extract::State;

use gasaware_application::AuditLogDto;

use crate::{
    error::ApiResult,
    extract::{Json, Query},
    models::AuditLogQuery,
    state::AppState,
};

/// Most recent audit entries
#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(AuditLogQuery),
    responses(
        (status = 200, description = "Audit entries, newest first", body = [AuditLogDto])
    )
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Json<Vec<AuditLogDto>>> {
    Ok(Json(state.audit.recent(query.limit).await?))
}
