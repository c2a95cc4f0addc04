//! Domain services: stateless rules that span several entities

mod content_filter;
mod multiplier;
mod scoring;

pub use content_filter::ContentFilter;
pub use multiplier::{resolve_multiplier, ScoringContext, SegmentMultipliers};
pub use scoring::{
    apply_multiplier, score_simulation, score_survey, QuestionResult, SimulationAnswer,
    SimulationOutcome, SurveyAnswer, SurveyOutcome, MAX_SCORE,
};
