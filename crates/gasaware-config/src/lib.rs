//! Gas awareness configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables such as `GASAWARE__SERVER__PORT=9000`.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{
    AppConfig, AppSettings, AuthConfig, ConfigManager as ConfigManagerTrait, JwtConfig,
    LoggingConfig, RateLimitConfig, ScoringConfig, ServerConfig,
};
