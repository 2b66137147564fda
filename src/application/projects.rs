//! Project service: cached list plus ownership-stamping writes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::cache::{CollectionCaches, CollectionKey};
use crate::domain::entities::ProjectRecord;
use crate::domain::identity::UserIdentity;
use crate::domain::types::EntityKind;

use super::error::AppError;
use super::events::{EventQueue, Outcome, Verb};
use super::stores::{InsightsStore, NewProject, ProjectPatch, ProjectsStore, ProposalsStore};

/// CRUD over projects.
///
/// Reads go through the collection cache; every write publishes exactly one
/// operation event and, on success, invalidates the projects key so the
/// next read re-fetches. Nothing is mutated optimistically. The acting
/// identity arrives as an explicit parameter on `create`.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectsStore>,
    insights: Arc<dyn InsightsStore>,
    proposals: Arc<dyn ProposalsStore>,
    caches: Arc<CollectionCaches>,
    events: Arc<EventQueue>,
}

impl ProjectService {
    pub fn new(
        store: Arc<dyn ProjectsStore>,
        insights: Arc<dyn InsightsStore>,
        proposals: Arc<dyn ProposalsStore>,
        caches: Arc<CollectionCaches>,
        events: Arc<EventQueue>,
    ) -> Self {
        Self {
            store,
            insights,
            proposals,
            caches,
            events,
        }
    }

    /// The project list, ordered by last update descending. Served from the
    /// cache when warm; concurrent cold calls share one store fetch.
    pub async fn load(&self) -> Result<Arc<Vec<ProjectRecord>>, AppError> {
        self.caches
            .projects()
            .load(|| self.store.list_projects())
            .await
            .map_err(AppError::from)
    }

    /// True while no list is available and a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.caches.is_loading(CollectionKey::Projects)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<ProjectRecord>, AppError> {
        self.store.find_project(id).await.map_err(AppError::from)
    }

    pub async fn create(
        &self,
        identity: Option<&UserIdentity>,
        input: NewProject,
    ) -> Result<ProjectRecord, AppError> {
        let result = self.try_create(identity, input).await;
        self.publish_outcome(Verb::Create, &result);
        result
    }

    async fn try_create(
        &self,
        identity: Option<&UserIdentity>,
        input: NewProject,
    ) -> Result<ProjectRecord, AppError> {
        let Some(identity) = identity else {
            return Err(AppError::Unauthenticated);
        };

        ensure_non_empty(&input.name, "name")?;
        ensure_non_empty(&input.client, "client")?;
        ensure_non_empty(&input.industry, "industry")?;

        let record = self.store.insert_project(identity.id, input).await?;
        self.caches.invalidate(CollectionKey::Projects);
        info!(project_id = %record.id, owner = %record.user_id, "Project created");
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<ProjectRecord, AppError> {
        let result = self.try_update(id, patch).await;
        self.publish_outcome(Verb::Update, &result);
        result
    }

    async fn try_update(&self, id: Uuid, patch: ProjectPatch) -> Result<ProjectRecord, AppError> {
        if patch.is_empty() {
            return Err(AppError::validation("update carries no fields"));
        }

        let record = self.store.update_project(id, patch).await?;
        self.caches.invalidate(CollectionKey::Projects);
        info!(project_id = %record.id, "Project updated");
        Ok(record)
    }

    /// Delete a project and everything attached to it. Idempotent: unknown
    /// ids succeed silently, matching the store's filter semantics.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = self.try_delete(id).await;
        self.publish_outcome(Verb::Delete, &result);
        result
    }

    async fn try_delete(&self, id: Uuid) -> Result<(), AppError> {
        // Dependents first, so a partial failure never orphans rows behind
        // an already-deleted parent.
        self.insights.delete_insights_for_project(id).await?;
        self.proposals.delete_proposals_for_project(id).await?;
        self.store.delete_project(id).await?;
        self.caches.invalidate(CollectionKey::Projects);
        info!(project_id = %id, "Project deleted");
        Ok(())
    }

    fn publish_outcome<T>(&self, verb: Verb, result: &Result<T, AppError>) {
        let outcome = match result {
            Ok(_) => Outcome::Succeeded,
            Err(err) => Outcome::failed(err.user_message()),
        };
        self.events.publish(EntityKind::Project, verb, outcome);
    }
}

pub(crate) fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
