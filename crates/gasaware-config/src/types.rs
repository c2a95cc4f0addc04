//! Core configuration types and data structures

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Access token signing
    pub jwt: JwtConfig,
    /// Password hashing, lockout and verification
    pub auth: AuthConfig,
    /// Per-client request limits
    pub rate_limit: RateLimitConfig,
    /// Fallback segment multipliers
    pub scoring: ScoringConfig,
    pub app: AppSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
    /// Peer addresses whose `X-Forwarded-For` header is trusted
    pub trusted_proxies: Vec<String>,
}

impl ServerConfig {
    /// Parsed `trusted_proxies`; entries that are not IP addresses are skipped
    pub fn trusted_proxy_addrs(&self) -> Vec<IpAddr> {
        self.trusted_proxies
            .iter()
            .filter_map(|p| p.trim().parse().ok())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret, at least 32 bytes
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_minutes: u32,
    pub refresh_token_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
    /// Failed logins within the window that lock an email out
    pub lockout_threshold: u32,
    pub lockout_window_minutes: u32,
    pub verification_token_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per client IP per window
    pub permits: u32,
    pub window_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub senior_multiplier: f64,
    pub industrial_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL used in verification links
    pub public_base_url: String,
    /// Seed demo accounts and content into an empty store
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".to_string()],
            trusted_proxies: Vec::new(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "development-only-secret-change-me-before-deploying".to_string(),
            issuer: "gasaware".to_string(),
            audience: "gasaware-clients".to_string(),
            access_token_minutes: 15,
            refresh_token_days: 7,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 11,
            lockout_threshold: 5,
            lockout_window_minutes: 15,
            verification_token_hours: 24,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            permits: 100,
            window_seconds: 60,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            senior_multiplier: 1.2,
            industrial_multiplier: 1.1,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".to_string(),
            seed_demo_data: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=info".to_string(),
            json: false,
        }
    }
}

/// Minimum JWT secret length in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

impl AppConfig {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        fn fail(msg: String) -> crate::Result<()> {
            Err(crate::ConfigError::Validation(msg))
        }

        if self.server.port == 0 {
            return fail("server.port must be greater than 0".into());
        }
        if let Some(bad) = self
            .server
            .trusted_proxies
            .iter()
            .find(|p| p.trim().parse::<IpAddr>().is_err())
        {
            return fail(format!("server.trusted_proxies entry '{bad}' is not an IP address"));
        }
        if self.jwt.secret.len() < MIN_JWT_SECRET_LEN {
            return fail(format!(
                "jwt.secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            ));
        }
        if self.jwt.access_token_minutes == 0 || self.jwt.refresh_token_days == 0 {
            return fail("jwt token lifetimes must be greater than 0".into());
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return fail(format!(
                "auth.bcrypt_cost must be within 4..=31, got {}",
                self.auth.bcrypt_cost
            ));
        }
        if self.auth.lockout_threshold == 0 {
            return fail("auth.lockout_threshold must be greater than 0".into());
        }
        if self.rate_limit.permits == 0 || self.rate_limit.window_seconds == 0 {
            return fail("rate_limit.permits and window_seconds must be greater than 0".into());
        }
        for (name, value) in [
            ("scoring.senior_multiplier", self.scoring.senior_multiplier),
            ("scoring.industrial_multiplier", self.scoring.industrial_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return fail(format!("{name} must be positive"));
            }
        }
        Ok(())
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration
    fn load_config(&mut self) -> crate::Result<AppConfig>;
    /// Save configuration
    fn save_config(&self, config: &AppConfig) -> crate::Result<()>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> crate::Result<()>;
}
