//! Data transfer objects
//!
//! Request and response shapes exchanged with the presentation layer. All
//! serialize with camelCase field names.

mod admin;
mod auth;
mod content;

pub use admin::*;
pub use auth::*;
pub use content::*;
