//! Account and token DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use gasaware_domain::entities::User;
use gasaware_domain::ports::IssuedToken;
use gasaware_domain::value_objects::{AgeGroup, SubscriptionType, UserId, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub subscription_type: SubscriptionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Account summary, with tokens when the caller is signed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Access token expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_email_verified: bool,
}

impl AuthResponse {
    /// Registration result: no tokens until the email is verified
    pub fn account_only(user: &User) -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            user_id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_email_verified: user.email_verified,
        }
    }

    pub fn signed_in(user: &User, access: IssuedToken, refresh_token: String) -> Self {
        Self {
            access_token: Some(access.token),
            refresh_token: Some(refresh_token),
            expires_at: Some(access.expires_at),
            ..Self::account_only(user)
        }
    }
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_email_verified: bool,
    pub birth_date: NaiveDate,
    pub age_group: AgeGroup,
    pub subscription_type: SubscriptionType,
    pub created_at: DateTime<Utc>,
}

impl UserProfileDto {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_email_verified: user.email_verified,
            birth_date: user.profile.birth_date,
            age_group: user.profile.age_group,
            subscription_type: user.profile.subscription_type,
            created_at: user.created_at,
        }
    }
}
