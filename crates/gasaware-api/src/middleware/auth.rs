//! Authentication gates for route groups
//!
//! Both gates verify the bearer token and leave the [`TokenSubject`] in the
//! request extensions for [`crate::extract::AuthUser`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use gasaware_domain::ports::TokenSubject;

use crate::{
    error::{ApiError, ApiResult},
    extract::bearer_token,
    state::AppState,
};

fn authenticate(state: &AppState, request: &Request) -> ApiResult<TokenSubject> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Authentication("Missing bearer token".to_string()))?;
    Ok(state.auth.authenticate(token)?)
}

/// Reject requests without a valid access token
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let subject = authenticate(&state, &request)?;
    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}

/// Reject requests unless the caller is an admin
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let subject = authenticate(&state, &request)?;
    if !subject.role.is_admin() {
        tracing::debug!(
            user_id = %subject.user_id,
            path = %request.uri().path(),
            "Admin route refused"
        );
        return Err(ApiError::Authorization("Admin role required".to_string()));
    }
    request.extensions_mut().insert(subject);
    Ok(next.run(request).await)
}
