//! Simulation catalog, authoring and answer scoring

use std::sync::Arc;

use tracing::info;

use gasaware_domain::entities::{Simulation, SimulationDraft};
use gasaware_domain::repositories::Repository;
use gasaware_domain::services::{score_simulation, ContentFilter};
use gasaware_domain::value_objects::{ModuleType, SimulationId, UserId};

use crate::dto::{
    SimulationDetailDto, SimulationResultDto, SimulationSubmission, SimulationSummaryDto,
};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::services::ScoringService;

pub struct SimulationService {
    simulations: Arc<dyn Repository<Simulation, SimulationId>>,
    scoring: Arc<ScoringService>,
}

impl SimulationService {
    pub fn new(
        simulations: Arc<dyn Repository<Simulation, SimulationId>>,
        scoring: Arc<ScoringService>,
    ) -> Self {
        Self {
            simulations,
            scoring,
        }
    }

    /// Published simulations admitted by `filter`
    pub async fn list(
        &self,
        filter: ContentFilter,
    ) -> ApplicationResult<Vec<SimulationSummaryDto>> {
        let mut simulations: Vec<Simulation> = self
            .simulations
            .find_all()
            .await?
            .into_iter()
            .filter(|s| s.is_published && filter.admits_simulation(s))
            .collect();
        simulations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(simulations.iter().map(SimulationSummaryDto::from_domain).collect())
    }

    /// Learner view of one simulation
    pub async fn get(&self, id: &SimulationId) -> ApplicationResult<SimulationDetailDto> {
        Ok(SimulationDetailDto::public(&self.load(id).await?))
    }

    /// Score a run and persist it as an attempt
    pub async fn submit(
        &self,
        user_id: &UserId,
        id: &SimulationId,
        submission: SimulationSubmission,
    ) -> ApplicationResult<SimulationResultDto> {
        let simulation = self.load(id).await?;
        let outcome = score_simulation(&simulation, &submission.answers);

        let score = self
            .scoring
            .record(user_id, ModuleType::Simulation, id.as_uuid(), outcome.raw_score)
            .await?;

        Ok(SimulationResultDto {
            attempt_id: score.attempt_id,
            score: score.final_score,
            raw_score: score.raw_score,
            segment_multiplier: score.segment_multiplier,
            total_questions: outcome.total_questions,
            correct_count: outcome.correct_count,
            details: outcome.details,
        })
    }

    pub async fn create(&self, draft: SimulationDraft) -> ApplicationResult<SimulationDetailDto> {
        let simulation = Simulation::publish(draft)?;
        self.simulations.save(&simulation).await?;
        info!(
            simulation_id = %simulation.id,
            questions = simulation.questions.len(),
            "Created simulation"
        );
        Ok(SimulationDetailDto::authoring(&simulation))
    }

    /// Replace metadata and the whole question set
    pub async fn update(
        &self,
        id: &SimulationId,
        draft: SimulationDraft,
    ) -> ApplicationResult<SimulationDetailDto> {
        let mut simulation = self.load(id).await?;
        simulation.replace(draft)?;
        self.simulations.save(&simulation).await?;
        Ok(SimulationDetailDto::authoring(&simulation))
    }

    pub async fn delete(&self, id: &SimulationId) -> ApplicationResult<()> {
        if !self.simulations.delete(id).await? {
            return Err(ApplicationError::not_found("Simulation", id));
        }
        info!(simulation_id = %id, "Deleted simulation");
        Ok(())
    }

    async fn load(&self, id: &SimulationId) -> ApplicationResult<Simulation> {
        self.simulations
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Simulation", id))
    }
}
