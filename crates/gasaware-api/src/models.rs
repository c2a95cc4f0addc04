//! API-only request and response models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use gasaware_domain::value_objects::{AgeGroup, SubscriptionType};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since start
    pub uptime: u64,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error detail
    pub error: ErrorDetail,
}

/// Error type and message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine readable error category
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human readable message
    pub message: String,
}

/// Segment filter for catalog listings. Without any filter the caller's
/// own profile is used when signed in.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Age group to filter for
    pub age_group: Option<AgeGroup>,
    /// Subscription tier to filter for
    pub subscription_type: Option<SubscriptionType>,
}

/// Video listing filter
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VideoQuery {
    /// Age group to filter for
    pub age_group: Option<AgeGroup>,
    /// Subscription tier to filter for
    pub subscription_type: Option<SubscriptionType>,
    /// Only videos carrying this tag
    pub tag: Option<String>,
}

/// Email verification link parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailQuery {
    /// Token from the verification mail
    #[serde(default)]
    pub token: String,
}

/// Audit log paging
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditLogQuery {
    /// Maximum entries to return
    pub limit: Option<usize>,
}
