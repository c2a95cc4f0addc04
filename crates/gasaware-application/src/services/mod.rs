//! Application layer services
//!
//! These services orchestrate domain entities and implement use cases.
//! All services are stateless and receive their repositories and ports
//! through the constructor.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Services                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AuthService          - Accounts, tokens, lockout            │
//! │  VideoService         - Video catalog and authoring          │
//! │  VideoProgressService - Per-user watch progress              │
//! │  SimulationService    - Quiz catalog, authoring, scoring     │
//! │  SurveyService        - Survey catalog, authoring, scoring   │
//! │  ScoringService       - Multiplier resolution, attempts      │
//! │  TargetingRuleService - Admin multiplier rules               │
//! │  ReportService        - Usage summary per segment            │
//! │  AuditService         - Request audit trail                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod audit_service;
mod auth_service;
mod report_service;
mod scoring_service;
mod simulation_service;
mod survey_service;
mod targeting_service;
mod video_service;

pub use audit_service::{AuditService, DEFAULT_AUDIT_LIMIT, MAX_AUDIT_LIMIT};
pub use auth_service::{AuthService, AuthSettings};
pub use report_service::ReportService;
pub use scoring_service::ScoringService;
pub use simulation_service::SimulationService;
pub use survey_service::SurveyService;
pub use targeting_service::TargetingRuleService;
pub use video_service::{VideoProgressService, VideoService};
