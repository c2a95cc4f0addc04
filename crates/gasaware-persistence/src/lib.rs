//! Gas awareness persistence layer
//!
//! Infrastructure layer providing repository implementations for the
//! domain aggregates. This crate implements the repository interfaces
//! defined in `gasaware-domain`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                                                         │
//! │  InMemoryRepository<T>        videos, simulations, surveys, rules │
//! │  InMemoryUserRepository       email + token lookups               │
//! │  InMemoryVideoProgressRepository, InMemoryAttemptRepository, ...  │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                               │
//! │  Repository<T, ID>, UserRepository, AttemptRepository, ...       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use gasaware_persistence::memory::InMemoryUserRepository;
//! use gasaware_domain::repositories::UserRepository;
//! use std::sync::Arc;
//!
//! let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;

pub use error::PersistenceError;

#[cfg(feature = "memory")]
pub use memory::{
    InMemoryAttemptRepository, InMemoryAuditLogRepository, InMemoryLoginAttemptRepository,
    InMemoryRepository, InMemorySurveyResponseRepository, InMemoryUserRepository,
    InMemoryVideoProgressRepository,
};
