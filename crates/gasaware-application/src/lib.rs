//! Gas Awareness Application Layer
//!
//! The application layer implements the platform's use cases by orchestrating
//! domain entities, domain services and the repository and port traits the
//! domain declares. Services are stateless; all mutable state lives behind
//! repositories.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Services              │ DTOs                  │ Errors                  │
//! │  ─────────             │ ────                  │ ──────                  │
//! │  AuthService           │ AuthResponse          │ ApplicationError        │
//! │  VideoService          │ VideoDto              │ ApplicationResult       │
//! │  VideoProgressService  │ VideoProgressDto      │                         │
//! │  SimulationService     │ SimulationDetailDto   │                         │
//! │  SurveyService         │ SurveyDetailDto       │                         │
//! │  ScoringService        │ ScoreDto              │                         │
//! │  TargetingRuleService  │ TargetingRuleDto      │                         │
//! │  ReportService         │ ReportSummaryDto      │                         │
//! │  AuditService          │ AuditLogDto           │                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                     │
//! │  Entities, Value Objects, Scoring, Repository Traits, Ports             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Non-Goals
//!
//! - Domain logic (belongs in the domain layer)
//! - Storage, hashing and token signing (adapters implement the domain ports)
//! - HTTP handling (belongs in the api crate)

pub mod dto;
pub mod errors;
pub mod services;

// Re-export commonly used types
pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use services::*;
