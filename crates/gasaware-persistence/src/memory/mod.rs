//! In-memory repository implementations
//!
//! Thread-safe implementations of the domain repository interfaces.
//! Each repository stores clones of the entities it is given.

mod attempt_repository;
mod entity_repository;
mod log_repository;
mod progress_repository;
mod survey_response_repository;
mod user_repository;

pub use attempt_repository::InMemoryAttemptRepository;
pub use entity_repository::InMemoryRepository;
pub use log_repository::{InMemoryAuditLogRepository, InMemoryLoginAttemptRepository};
pub use progress_repository::InMemoryVideoProgressRepository;
pub use survey_response_repository::InMemorySurveyResponseRepository;
pub use user_repository::InMemoryUserRepository;
