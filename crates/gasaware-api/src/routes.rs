//! API route definitions

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{
        audit, auth, health, progress, reports, rules, scores, simulations, surveys, videos,
    },
    middleware::{
        audit_middleware, logging_middleware, rate_limit_middleware, require_admin, require_auth,
    },
    state::AppState,
};

/// Routes open to anonymous callers
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Authentication
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/verify-email", get(auth::verify_email))
        .route(
            "/api/auth/resend-verification",
            post(auth::resend_verification),
        )
        // Catalog
        .route("/api/videos", get(videos::list_videos))
        .route("/api/videos/:id", get(videos::get_video))
        .route("/api/simulations", get(simulations::list_simulations))
        .route("/api/simulations/:id", get(simulations::get_simulation))
}

/// Routes that need a valid access token. Authoring roles are checked by
/// the handlers.
pub fn authenticated_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(auth::me))
        // Videos
        .route("/api/videos", post(videos::create_video))
        .route(
            "/api/videos/:id",
            put(videos::update_video).delete(videos::delete_video),
        )
        .route("/api/video-progress", get(progress::list_progress))
        .route(
            "/api/video-progress/:video_id",
            put(progress::update_progress),
        )
        // Simulations
        .route("/api/simulations", post(simulations::create_simulation))
        .route(
            "/api/simulations/:id",
            put(simulations::update_simulation).delete(simulations::delete_simulation),
        )
        .route(
            "/api/simulations/:id/answers",
            post(simulations::submit_answers),
        )
        // Surveys
        .route("/api/surveys", post(surveys::create_survey))
        .route("/api/surveys/active", get(surveys::list_active_surveys))
        .route(
            "/api/surveys/:id",
            get(surveys::get_survey)
                .put(surveys::update_survey)
                .delete(surveys::delete_survey),
        )
        .route(
            "/api/surveys/:id/responses",
            post(surveys::submit_responses),
        )
        // Scores
        .route("/api/scores/me", get(scores::my_scores))
        .layer(from_fn_with_state(state, require_auth))
}

/// Admin-only routes
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/content-targeting-rules",
            get(rules::list_rules).post(rules::create_rule),
        )
        .route(
            "/api/admin/content-targeting-rules/:id",
            get(rules::get_rule)
                .put(rules::update_rule)
                .delete(rules::delete_rule),
        )
        .route("/api/admin/audit-logs", get(audit::list_audit_logs))
        .route("/api/reports/summary", get(reports::summary))
        .route("/api/reports/by-segment", get(reports::by_segment))
        .layer(from_fn_with_state(state, require_admin))
}

/// Swagger UI routes
pub fn swagger_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// CORS from configured origins; `*` allows any origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Full application router with middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    public_routes()
        .merge(authenticated_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(swagger_routes())
        .layer(from_fn_with_state(state.clone(), audit_middleware))
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::refresh,
        auth::verify_email,
        auth::resend_verification,
        auth::me,
        videos::list_videos,
        videos::get_video,
        videos::create_video,
        videos::update_video,
        videos::delete_video,
        progress::list_progress,
        progress::update_progress,
        simulations::list_simulations,
        simulations::get_simulation,
        simulations::submit_answers,
        simulations::create_simulation,
        simulations::update_simulation,
        simulations::delete_simulation,
        surveys::list_active_surveys,
        surveys::get_survey,
        surveys::submit_responses,
        surveys::create_survey,
        surveys::update_survey,
        surveys::delete_survey,
        scores::my_scores,
        rules::list_rules,
        rules::get_rule,
        rules::create_rule,
        rules::update_rule,
        rules::delete_rule,
        reports::summary,
        reports::by_segment,
        audit::list_audit_logs,
    ),
    components(schemas(
        crate::models::HealthResponse,
        crate::models::MessageResponse,
        crate::models::ErrorResponse,
        crate::models::ErrorDetail,
        gasaware_application::RegisterRequest,
        gasaware_application::LoginRequest,
        gasaware_application::RefreshRequest,
        gasaware_application::ResendVerificationRequest,
        gasaware_application::AuthResponse,
        gasaware_application::UserProfileDto,
        gasaware_application::VideoDto,
        gasaware_application::VideoProgressDto,
        gasaware_application::UpdateProgressRequest,
        gasaware_application::SimulationSummaryDto,
        gasaware_application::SimulationOptionDto,
        gasaware_application::SimulationQuestionDto,
        gasaware_application::SimulationDetailDto,
        gasaware_application::SimulationSubmission,
        gasaware_application::SimulationResultDto,
        gasaware_application::SurveySummaryDto,
        gasaware_application::SurveyOptionDto,
        gasaware_application::SurveyQuestionDto,
        gasaware_application::SurveyDetailDto,
        gasaware_application::SurveySubmission,
        gasaware_application::SurveyResultDto,
        gasaware_application::ScoreDto,
        gasaware_application::TargetingRuleDto,
        gasaware_application::SegmentStats,
        gasaware_application::ReportSummaryDto,
        gasaware_application::AuditLogDto,
        gasaware_domain::entities::VideoDraft,
        gasaware_domain::entities::SimulationDraft,
        gasaware_domain::entities::SimulationQuestionDraft,
        gasaware_domain::entities::SimulationOptionDraft,
        gasaware_domain::entities::SurveyDraft,
        gasaware_domain::entities::SurveyQuestionDraft,
        gasaware_domain::entities::SurveyOptionDraft,
        gasaware_domain::entities::TargetingRuleDraft,
        gasaware_domain::services::SimulationAnswer,
        gasaware_domain::services::SurveyAnswer,
        gasaware_domain::services::QuestionResult,
        gasaware_domain::value_objects::AgeGroup,
        gasaware_domain::value_objects::SubscriptionType,
        gasaware_domain::value_objects::UserRole,
        gasaware_domain::value_objects::ModuleType,
        gasaware_domain::value_objects::QuestionType,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Accounts and tokens"),
        (name = "videos", description = "Video catalog and watch progress"),
        (name = "simulations", description = "Scored safety simulations"),
        (name = "surveys", description = "Weighted awareness surveys"),
        (name = "scores", description = "Score history"),
        (name = "admin", description = "Targeting rules, reports and audit log")
    ),
    info(
        title = "Gas Awareness API",
        version = "1.0.0",
        description = "RESTful API for gas safety videos, simulations, surveys and segment scoring"
    )
)]
pub struct ApiDoc;
