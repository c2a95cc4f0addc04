#![warn(missing_docs)]

//! Gas Awareness RESTful API
//!
//! axum server exposing authentication, the video, simulation and survey
//! catalogs, scoring, and the admin surface (targeting rules, reports,
//! audit log), with OpenAPI docs served through Swagger UI.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  middleware   logging → rate limit → audit → CORS / trace    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  routes       public │ authenticated │ admin │ swagger       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  handlers     thin adapters over gasaware-application        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod server;
pub mod state;

pub use server::ApiServer;
pub use state::AppState;
