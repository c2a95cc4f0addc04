//! Gas awareness domain layer
//!
//! Entities, value objects, repository contracts and the pure rules the
//! platform is built around: age-group content access, subscription
//! filtering, quiz and survey scoring, and segment multipliers.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Domain Layer                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  value_objects   AgeGroup, SubscriptionType, UserRole, ids    │
//! │  entities        User, Video, Simulation, Survey, Attempt...  │
//! │  services        ContentFilter, scoring, SegmentMultipliers   │
//! │  ports           PasswordHasher, TokenIssuer, Mailer          │
//! │  repositories    traits implemented by the persistence crate  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod entities;
pub mod errors;
pub mod ports;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
