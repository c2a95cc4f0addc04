//! API route handlers

pub mod audit;
pub mod auth;
pub mod health;
pub mod progress;
pub mod reports;
pub mod rules;
pub mod scores;
pub mod simulations;
pub mod surveys;
pub mod videos;

use gasaware_application::ApplicationError;
use gasaware_domain::ports::TokenSubject;
use gasaware_domain::repositories::Repository;
use gasaware_domain::services::ContentFilter;
use gasaware_domain::value_objects::{AgeGroup, SubscriptionType};

use crate::{error::ApiResult, state::AppState};

/// Catalog filter for a listing: explicit query parameters win, otherwise
/// the signed-in caller's own segment, otherwise no filter.
pub(crate) async fn catalog_filter(
    state: &AppState,
    caller: Option<&TokenSubject>,
    age_group: Option<AgeGroup>,
    subscription_type: Option<SubscriptionType>,
) -> ApiResult<ContentFilter> {
    if age_group.is_some() || subscription_type.is_some() {
        return Ok(ContentFilter::new(age_group, subscription_type));
    }
    let Some(caller) = caller else {
        return Ok(ContentFilter::default());
    };
    let user = state
        .users
        .find_by_id(&caller.user_id)
        .await
        .map_err(ApplicationError::from)?;
    Ok(user.as_ref().map(ContentFilter::for_user).unwrap_or_default())
}
