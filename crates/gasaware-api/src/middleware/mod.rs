//! Request middleware: logging, authentication gates, rate limiting, audit

pub mod audit;
pub mod auth;
pub mod logging;
pub mod rate_limit;

pub use audit::audit_middleware;
pub use auth::{require_admin, require_auth};
pub use logging::logging_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimiter};
