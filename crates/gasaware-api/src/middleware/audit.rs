//! Audit trail of successful mutating requests

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::{extract::bearer_token, state::AppState};

fn is_mutation(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

/// Record successful POST, PUT and DELETE requests. Write failures are
/// logged and never change the response.
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    if !is_mutation(&method) {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    let user_id = bearer_token(request.headers())
        .and_then(|token| state.auth.authenticate(token).ok())
        .map(|subject| subject.user_id);

    let response = next.run(request).await;
    let status = response.status();
    if status.is_success() {
        let meta = format!("status={}", status.as_u16());
        if let Err(e) = state
            .audit
            .record(user_id, method.as_str(), &path, Some(meta))
            .await
        {
            tracing::error!(error = %e, path = %path, "Failed to write audit log");
        }
    }
    response
}
