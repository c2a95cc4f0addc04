//! Registration, login, token refresh and email verification

use axum::{extract::State, http::StatusCode};

use gasaware_application::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, ResendVerificationRequest,
    UserProfileDto,
};

use crate::{
    error::{ApiError, ApiResult},
    extract::{AuthUser, ClientIp, Json, Query},
    models::{ErrorResponse, MessageResponse, VerifyEmailQuery},
    state::AppState,
};

/// Create an account and send the verification mail
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, email verification pending", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for an access and refresh token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Email not verified", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 429, description = "Too many failed attempts", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(state.auth.login(request, ip).await?))
}

/// Rotate a refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = AuthResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(state.auth.refresh(request).await?))
}

/// Confirm an email address from the mailed link
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    tag = "auth",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Missing, unknown or expired token", body = ErrorResponse)
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> ApiResult<Json<MessageResponse>> {
    if state.auth.verify_email(&query.token).await? {
        Ok(Json(MessageResponse::new("Email verified successfully")))
    } else {
        Err(ApiError::BadRequest(
            "Invalid or expired verification token".to_string(),
        ))
    }
}

/// Send a fresh verification link
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = "auth",
    request_body = ResendVerificationRequest,
    responses(
        (status = 200, description = "Verification mail sent", body = MessageResponse),
        (status = 400, description = "Unknown or already verified email", body = ErrorResponse)
    )
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(request): Json<ResendVerificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.resend_verification(request).await?;
    Ok(Json(MessageResponse::new("Verification email sent")))
}

/// Profile of the signed-in caller
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller profile", body = UserProfileDto),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<UserProfileDto>> {
    Ok(Json(state.auth.profile(&caller.user_id).await?))
}
