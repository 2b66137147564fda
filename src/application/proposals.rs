//! Proposal service: drafts attached to a project.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::ProposalRecord;
use crate::domain::error::DomainError;
use crate::domain::types::EntityKind;

use super::error::AppError;
use super::events::{EventQueue, Outcome, Verb};
use super::stores::{NewProposal, ProjectsStore, ProposalPatch, ProposalsStore};

#[derive(Clone)]
pub struct ProposalService {
    store: Arc<dyn ProposalsStore>,
    projects: Arc<dyn ProjectsStore>,
    events: Arc<EventQueue>,
}

impl ProposalService {
    pub fn new(
        store: Arc<dyn ProposalsStore>,
        projects: Arc<dyn ProjectsStore>,
        events: Arc<EventQueue>,
    ) -> Self {
        Self {
            store,
            projects,
            events,
        }
    }

    /// Proposals for one project, newest first.
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ProposalRecord>, AppError> {
        self.store
            .list_proposals_for_project(project_id)
            .await
            .map_err(AppError::from)
    }

    /// Create a proposal under an existing project. The project is looked
    /// up first so a dangling proposal can never be written.
    pub async fn create(
        &self,
        project_id: Uuid,
        input: NewProposal,
    ) -> Result<ProposalRecord, AppError> {
        let result = self.try_create(project_id, input).await;
        self.publish_outcome(Verb::Create, &result);
        result
    }

    async fn try_create(
        &self,
        project_id: Uuid,
        input: NewProposal,
    ) -> Result<ProposalRecord, AppError> {
        self.projects
            .find_project(project_id)
            .await?
            .ok_or_else(|| DomainError::not_found("project"))?;

        let record = self.store.insert_proposal(project_id, input).await?;
        info!(proposal_id = %record.id, project_id = %project_id, "Proposal created");
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, patch: ProposalPatch) -> Result<ProposalRecord, AppError> {
        let result = self.try_update(id, patch).await;
        self.publish_outcome(Verb::Update, &result);
        result
    }

    async fn try_update(&self, id: Uuid, patch: ProposalPatch) -> Result<ProposalRecord, AppError> {
        if patch.is_empty() {
            return Err(AppError::validation("update carries no fields"));
        }

        let record = self.store.update_proposal(id, patch).await?;
        info!(proposal_id = %record.id, "Proposal updated");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = self
            .store
            .delete_proposal(id)
            .await
            .map_err(AppError::from);
        self.publish_outcome(Verb::Delete, &result);
        result
    }

    fn publish_outcome<T>(&self, verb: Verb, result: &Result<T, AppError>) {
        let outcome = match result {
            Ok(_) => Outcome::Succeeded,
            Err(err) => Outcome::failed(err.user_message()),
        };
        self.events.publish(EntityKind::Proposal, verb, outcome);
    }
}
