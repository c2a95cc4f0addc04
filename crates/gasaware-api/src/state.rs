//! Application state for the API server

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;

use gasaware_application::{
    AuditService, AuthService, AuthSettings, ReportService, ScoringService, SimulationService,
    SurveyService, TargetingRuleService, VideoProgressService, VideoService,
};
use gasaware_config::AppConfig;
use gasaware_domain::entities::{ContentTargetingRule, Simulation, Survey, Video};
use gasaware_domain::ports::{Mailer, PasswordHasher};
use gasaware_domain::repositories::{Repository, UserRepository};
use gasaware_domain::services::SegmentMultipliers;
use gasaware_domain::value_objects::RuleId;
use gasaware_persistence::{
    InMemoryAttemptRepository, InMemoryAuditLogRepository, InMemoryLoginAttemptRepository,
    InMemoryRepository, InMemorySurveyResponseRepository, InMemoryUserRepository,
    InMemoryVideoProgressRepository,
};
use gasaware_security::{BcryptHasher, JwtManager, JwtSettings};

use crate::mailer::LogMailer;
use crate::middleware::rate_limit::RateLimiter;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Accounts and tokens
    pub auth: Arc<AuthService>,
    /// Video catalog
    pub videos: Arc<VideoService>,
    /// Watch progress
    pub progress: Arc<VideoProgressService>,
    /// Simulation catalog and scoring
    pub simulations: Arc<SimulationService>,
    /// Survey catalog and scoring
    pub surveys: Arc<SurveyService>,
    /// Score history and multiplier resolution
    pub scoring: Arc<ScoringService>,
    /// Admin targeting rules
    pub rules: Arc<TargetingRuleService>,
    /// Admin reports
    pub reports: Arc<ReportService>,
    /// Audit trail
    pub audit: Arc<AuditService>,
    /// Account storage, used for seeding
    pub users: Arc<dyn UserRepository>,
    /// Password hasher, used for seeding
    pub hasher: Arc<dyn PasswordHasher>,
    /// Per-client request limiter
    pub rate_limiter: Arc<RateLimiter>,
    /// Peers allowed to report the client address in `X-Forwarded-For`
    pub trusted_proxies: Arc<[IpAddr]>,
    /// Effective configuration
    pub config: Arc<AppConfig>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Wire in-memory storage, the security adapters and the log mailer
    pub fn new(config: AppConfig) -> Self {
        Self::with_mailer(config, Arc::new(LogMailer))
    }

    /// Same as [`AppState::new`] with a custom mail adapter
    pub fn with_mailer(config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let videos: Arc<dyn Repository<Video, _>> = Arc::new(InMemoryRepository::<Video>::new());
        let simulations: Arc<dyn Repository<Simulation, _>> =
            Arc::new(InMemoryRepository::<Simulation>::new());
        let surveys: Arc<dyn Repository<Survey, _>> = Arc::new(InMemoryRepository::<Survey>::new());
        let rules: Arc<dyn Repository<ContentTargetingRule, RuleId>> =
            Arc::new(InMemoryRepository::<ContentTargetingRule>::new());
        let progress = Arc::new(InMemoryVideoProgressRepository::new());
        let attempts = Arc::new(InMemoryAttemptRepository::new());

        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(config.auth.bcrypt_cost));
        let jwt = Arc::new(JwtManager::new(jwt_settings(&config)));

        let scoring = Arc::new(ScoringService::new(
            users.clone(),
            rules.clone(),
            attempts.clone(),
            segment_multipliers(&config),
        ));

        Self {
            auth: Arc::new(AuthService::new(
                users.clone(),
                Arc::new(InMemoryLoginAttemptRepository::new()),
                hasher.clone(),
                jwt,
                mailer,
                auth_settings(&config),
            )),
            videos: Arc::new(VideoService::new(videos.clone(), progress.clone())),
            progress: Arc::new(VideoProgressService::new(videos, progress)),
            simulations: Arc::new(SimulationService::new(simulations, scoring.clone())),
            surveys: Arc::new(SurveyService::new(
                surveys,
                Arc::new(InMemorySurveyResponseRepository::new()),
                scoring.clone(),
            )),
            scoring,
            rules: Arc::new(TargetingRuleService::new(rules)),
            reports: Arc::new(ReportService::new(users.clone(), attempts)),
            audit: Arc::new(AuditService::new(Arc::new(InMemoryAuditLogRepository::new()))),
            users,
            hasher,
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit.permits,
                std::time::Duration::from_secs(config.rate_limit.window_seconds),
            )),
            trusted_proxies: config.server.trusted_proxy_addrs().into(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn jwt_settings(config: &AppConfig) -> JwtSettings {
    JwtSettings {
        secret: config.jwt.secret.clone(),
        issuer: config.jwt.issuer.clone(),
        audience: config.jwt.audience.clone(),
        access_token_ttl: Duration::minutes(i64::from(config.jwt.access_token_minutes)),
    }
}

fn auth_settings(config: &AppConfig) -> AuthSettings {
    AuthSettings {
        lockout_threshold: config.auth.lockout_threshold,
        lockout_window: Duration::minutes(i64::from(config.auth.lockout_window_minutes)),
        verification_ttl: Duration::hours(i64::from(config.auth.verification_token_hours)),
        refresh_ttl: Duration::days(i64::from(config.jwt.refresh_token_days)),
        public_base_url: config.app.public_base_url.clone(),
    }
}

fn segment_multipliers(config: &AppConfig) -> SegmentMultipliers {
    SegmentMultipliers {
        senior: config.scoring.senior_multiplier,
        industrial: config.scoring.industrial_multiplier,
    }
}
