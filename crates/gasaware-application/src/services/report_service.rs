//! Admin usage reports

use std::collections::HashMap;
use std::sync::Arc;

use gasaware_domain::entities::{Attempt, User};
use gasaware_domain::repositories::{AttemptRepository, Repository, UserRepository};
use gasaware_domain::value_objects::{AgeGroup, SubscriptionType, UserId};

use crate::dto::{ReportSummaryDto, SegmentStats};
use crate::errors::ApplicationResult;

pub struct ReportService {
    users: Arc<dyn UserRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl ReportService {
    pub fn new(users: Arc<dyn UserRepository>, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { users, attempts }
    }

    /// Totals plus a breakdown per age group and per subscription tier.
    /// Segments without users are left out.
    pub async fn summary(&self) -> ApplicationResult<ReportSummaryDto> {
        let users = self.users.find_all().await?;
        let attempts = self.attempts.find_all_attempts().await?;

        let mut by_user: HashMap<UserId, Vec<&Attempt>> = HashMap::new();
        for attempt in &attempts {
            by_user.entry(attempt.user_id).or_default().push(attempt);
        }

        let by_age_group = AgeGroup::ALL
            .iter()
            .filter_map(|group| {
                segment_stats(group.as_str(), &users, &by_user, |u| u.age_group() == *group)
            })
            .collect();
        let by_subscription = SubscriptionType::ALL
            .iter()
            .filter_map(|tier| {
                segment_stats(tier.as_str(), &users, &by_user, |u| {
                    u.subscription_type() == *tier
                })
            })
            .collect();

        Ok(ReportSummaryDto {
            total_users: users.len(),
            total_attempts: attempts.len(),
            average_score: average_score(attempts.iter()),
            by_age_group,
            by_subscription,
        })
    }
}

fn segment_stats(
    name: &str,
    users: &[User],
    by_user: &HashMap<UserId, Vec<&Attempt>>,
    member: impl Fn(&User) -> bool,
) -> Option<SegmentStats> {
    let members: Vec<&User> = users.iter().filter(|u| member(u)).collect();
    if members.is_empty() {
        return None;
    }

    let attempts: Vec<&Attempt> = members
        .iter()
        .filter_map(|u| by_user.get(&u.id))
        .flatten()
        .copied()
        .collect();

    Some(SegmentStats {
        segment: name.to_string(),
        user_count: members.len(),
        attempt_count: attempts.len(),
        average_score: average_score(attempts.into_iter()),
    })
}

/// Mean over attempts that carry a score
fn average_score<'a>(attempts: impl Iterator<Item = &'a Attempt>) -> f64 {
    let (sum, count) = attempts
        .filter_map(|a| a.score)
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasaware_domain::value_objects::ModuleType;
    use uuid::Uuid;

    #[test]
    fn test_average_skips_unscored_attempts() {
        let user = UserId::new();
        let scored = Attempt::completed(user, ModuleType::Survey, Uuid::new_v4(), 80.0);
        let mut open = Attempt::completed(user, ModuleType::Survey, Uuid::new_v4(), 0.0);
        open.score = None;
        let other = Attempt::completed(user, ModuleType::Simulation, Uuid::new_v4(), 40.0);

        assert_eq!(average_score([&scored, &open, &other].into_iter()), 60.0);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_score(std::iter::empty()), 0.0);
    }
}
