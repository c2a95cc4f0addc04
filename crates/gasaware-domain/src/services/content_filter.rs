//! Catalog filtering by age group and subscription tier

use serde::{Deserialize, Serialize};

use crate::entities::{Simulation, Survey, SurveyQuestion, User, Video};
use crate::value_objects::{AgeGroup, SubscriptionType};

/// Segment a catalog listing is filtered for. Unset dimensions admit everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilter {
    pub age_group: Option<AgeGroup>,
    pub subscription: Option<SubscriptionType>,
}

impl ContentFilter {
    pub fn new(age_group: Option<AgeGroup>, subscription: Option<SubscriptionType>) -> Self {
        Self {
            age_group,
            subscription,
        }
    }

    /// Filter matching the segment of a user's profile
    pub fn for_user(user: &User) -> Self {
        Self::new(Some(user.age_group()), Some(user.subscription_type()))
    }

    pub fn is_empty(&self) -> bool {
        self.age_group.is_none() && self.subscription.is_none()
    }

    /// Content with a minimum age group and an optional tier restriction
    pub fn admits(
        &self,
        min_age_group: AgeGroup,
        subscription_filter: Option<SubscriptionType>,
    ) -> bool {
        let age_ok = self.age_group.map_or(true, |g| g.can_access(min_age_group));
        let sub_ok = match (self.subscription, subscription_filter) {
            (Some(wanted), Some(required)) => wanted == required,
            _ => true,
        };
        age_ok && sub_ok
    }

    /// Survey questions target an exact age group rather than a minimum
    pub fn admits_question(
        &self,
        age_filter: Option<AgeGroup>,
        subscription_filter: Option<SubscriptionType>,
    ) -> bool {
        let age_ok = match (self.age_group, age_filter) {
            (Some(wanted), Some(required)) => wanted == required,
            _ => true,
        };
        let sub_ok = match (self.subscription, subscription_filter) {
            (Some(wanted), Some(required)) => wanted == required,
            _ => true,
        };
        age_ok && sub_ok
    }

    pub fn admits_video(&self, video: &Video) -> bool {
        self.admits(video.min_age_group, video.subscription_filter)
    }

    pub fn admits_simulation(&self, simulation: &Simulation) -> bool {
        self.admits(simulation.min_age_group, simulation.subscription_filter)
    }

    pub fn admits_survey_question(&self, question: &SurveyQuestion) -> bool {
        self.admits_question(question.age_group_filter, question.subscription_filter)
    }

    /// An empty filter admits every survey; otherwise at least one question must pass
    pub fn admits_survey(&self, survey: &Survey) -> bool {
        self.is_empty()
            || survey
                .questions
                .iter()
                .any(|q| self.admits_survey_question(q))
    }
}
