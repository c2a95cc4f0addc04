//! Domain entities
//!
//! Plain data records with the validation and state transitions that
//! belong to them. Persistence adapters store clones of these values.

mod attempt;
mod log;
mod simulation;
mod survey;
mod targeting;
mod user;
mod video;

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub use attempt::{Attempt, Score, SurveyResponse};
pub use log::{AuditLog, LoginAttempt};
pub use simulation::{
    Simulation, SimulationDraft, SimulationOption, SimulationOptionDraft, SimulationQuestion,
    SimulationQuestionDraft,
};
pub use survey::{
    Survey, SurveyDraft, SurveyOption, SurveyOptionDraft, SurveyQuestion, SurveyQuestionDraft,
};
pub use targeting::{ContentTargetingRule, TargetingRuleDraft};
pub use user::{
    normalize_email, validate_email, validate_password, ExpiringToken, User, UserProfile,
    VerificationOutcome,
};
pub use video::{Video, VideoDraft, VideoProgress};

/// Entities addressable by a stable identifier
pub trait Identified {
    /// Identifier type
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Identifier of this entity
    fn id(&self) -> Self::Id;
}

pub(crate) fn require_text(field: &str, value: &str, max_len: usize) -> crate::DomainResult<()> {
    if value.trim().is_empty() {
        return Err(crate::DomainError::validation(field, "cannot be empty"));
    }
    if value.chars().count() > max_len {
        return Err(crate::DomainError::validation(
            field,
            format!("cannot exceed {max_len} characters"),
        ));
    }
    Ok(())
}
