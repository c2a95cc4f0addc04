//! Request extractors for the caller's identity and address

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequest, FromRequestParts},
    http::{header, request::Parts, Extensions, HeaderMap},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use gasaware_domain::ports::TokenSubject;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// JSON body. Malformed bodies are rejected with the API error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameters; unparsable segments become 400 `bad_request`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Query string with the same rejection handling as [`Path`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// Bearer token from the `Authorization` header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the caller from extensions set by the auth middleware, falling
/// back to the bearer token.
pub fn resolve_subject(parts: &Parts, state: &AppState) -> ApiResult<Option<TokenSubject>> {
    if let Some(subject) = parts.extensions.get::<TokenSubject>() {
        return Ok(Some(subject.clone()));
    }
    match bearer_token(&parts.headers) {
        Some(token) => Ok(Some(state.auth.authenticate(token)?)),
        None => Ok(None),
    }
}

/// Signed-in caller. Rejects with 401 when the token is missing or invalid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub TokenSubject);

impl AuthUser {
    /// Editors and admins may create and update content
    pub fn require_author(&self) -> ApiResult<()> {
        if self.0.role.can_author_content() {
            Ok(())
        } else {
            Err(ApiError::Authorization(
                "Editor or Admin role required".to_string(),
            ))
        }
    }

    /// Only admins may delete content
    pub fn require_admin(&self) -> ApiResult<()> {
        if self.0.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Authorization("Admin role required".to_string()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> ApiResult<Self> {
        resolve_subject(parts, state)?
            .map(AuthUser)
            .ok_or_else(|| ApiError::Authentication("Missing bearer token".to_string()))
    }
}

/// Caller when a valid token is present. Missing, expired or invalid tokens
/// leave the request anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<TokenSubject>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Infallible> {
        let subject = resolve_subject(parts, state).unwrap_or_else(|e| {
            debug!(error = %e, "Ignoring unusable token on a public route");
            None
        });
        Ok(MaybeAuthUser(subject))
    }
}

/// Client address: the socket peer, or the first `X-Forwarded-For` hop when
/// the peer is a trusted proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl ClientIp {
    /// Read the address from request headers and extensions
    pub fn resolve(
        headers: &HeaderMap,
        extensions: &Extensions,
        trusted_proxies: &[IpAddr],
    ) -> Self {
        let peer = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        let forwarded = || {
            headers
                .get(FORWARDED_FOR)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match peer {
            Some(ip) if trusted_proxies.contains(&ip) => {
                ClientIp(forwarded().or_else(|| Some(ip.to_string())))
            }
            other => ClientIp(other.map(|ip| ip.to_string())),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Infallible> {
        Ok(ClientIp::resolve(
            &parts.headers,
            &parts.extensions,
            &state.trusted_proxies,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        let p = parts(
            Request::builder()
                .header(header::AUTHORIZATION, "Bearer abc.def")
                .body(())
                .unwrap(),
        );
        assert_eq!(bearer_token(&p.headers), Some("abc.def"));

        let p = parts(
            Request::builder()
                .header(header::AUTHORIZATION, "Basic xyz")
                .body(())
                .unwrap(),
        );
        assert_eq!(bearer_token(&p.headers), None);

        let p = parts(Request::builder().body(()).unwrap());
        assert_eq!(bearer_token(&p.headers), None);
    }

    fn with_peer(mut p: Parts, peer: [u8; 4]) -> Parts {
        p.extensions.insert(ConnectInfo(SocketAddr::from((peer, 4000))));
        p
    }

    #[test]
    fn test_client_ip_ignores_forwarded_for_from_untrusted_peer() {
        let p = parts(
            Request::builder()
                .header(FORWARDED_FOR, "203.0.113.7")
                .body(())
                .unwrap(),
        );
        let p = with_peer(p, [198, 51, 100, 4]);
        assert_eq!(
            ClientIp::resolve(&p.headers, &p.extensions, &[]),
            ClientIp(Some("198.51.100.4".into()))
        );
    }

    #[test]
    fn test_client_ip_uses_forwarded_for_behind_trusted_proxy() {
        let proxy: IpAddr = [127, 0, 0, 1].into();
        let p = parts(
            Request::builder()
                .header(FORWARDED_FOR, "203.0.113.7, 10.0.0.1")
                .body(())
                .unwrap(),
        );
        let p = with_peer(p, [127, 0, 0, 1]);
        assert_eq!(
            ClientIp::resolve(&p.headers, &p.extensions, &[proxy]),
            ClientIp(Some("203.0.113.7".into()))
        );

        let bare = with_peer(parts(Request::builder().body(()).unwrap()), [127, 0, 0, 1]);
        assert_eq!(
            ClientIp::resolve(&bare.headers, &bare.extensions, &[proxy]),
            ClientIp(Some("127.0.0.1".into()))
        );
    }

    #[test]
    fn test_client_ip_without_peer_is_unknown() {
        let p = parts(
            Request::builder()
                .header(FORWARDED_FOR, "203.0.113.7")
                .body(())
                .unwrap(),
        );
        assert_eq!(ClientIp::resolve(&p.headers, &p.extensions, &[]), ClientIp(None));
    }
}
