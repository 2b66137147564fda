//! Case-study service. Same shape as the project service, minus cascade.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::cache::{CollectionCaches, CollectionKey};
use crate::domain::entities::CaseStudyRecord;
use crate::domain::identity::UserIdentity;
use crate::domain::types::EntityKind;

use super::error::AppError;
use super::events::{EventQueue, Outcome, Verb};
use super::projects::ensure_non_empty;
use super::stores::{CaseStudiesStore, CaseStudyPatch, NewCaseStudy};

#[derive(Clone)]
pub struct CaseStudyService {
    store: Arc<dyn CaseStudiesStore>,
    caches: Arc<CollectionCaches>,
    events: Arc<EventQueue>,
}

impl CaseStudyService {
    pub fn new(
        store: Arc<dyn CaseStudiesStore>,
        caches: Arc<CollectionCaches>,
        events: Arc<EventQueue>,
    ) -> Self {
        Self {
            store,
            caches,
            events,
        }
    }

    /// The case-study list, newest first.
    pub async fn load(&self) -> Result<Arc<Vec<CaseStudyRecord>>, AppError> {
        self.caches
            .case_studies()
            .load(|| self.store.list_case_studies())
            .await
            .map_err(AppError::from)
    }

    pub fn is_loading(&self) -> bool {
        self.caches.is_loading(CollectionKey::CaseStudies)
    }

    pub async fn create(
        &self,
        identity: Option<&UserIdentity>,
        input: NewCaseStudy,
    ) -> Result<CaseStudyRecord, AppError> {
        let result = self.try_create(identity, input).await;
        self.publish_outcome(Verb::Create, &result);
        result
    }

    async fn try_create(
        &self,
        identity: Option<&UserIdentity>,
        input: NewCaseStudy,
    ) -> Result<CaseStudyRecord, AppError> {
        let Some(identity) = identity else {
            return Err(AppError::Unauthenticated);
        };

        ensure_non_empty(&input.title, "title")?;
        ensure_non_empty(&input.industry, "industry")?;

        let record = self.store.insert_case_study(identity.id, input).await?;
        self.caches.invalidate(CollectionKey::CaseStudies);
        info!(case_study_id = %record.id, owner = %record.user_id, "Case study created");
        Ok(record)
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: CaseStudyPatch,
    ) -> Result<CaseStudyRecord, AppError> {
        let result = self.try_update(id, patch).await;
        self.publish_outcome(Verb::Update, &result);
        result
    }

    async fn try_update(
        &self,
        id: Uuid,
        patch: CaseStudyPatch,
    ) -> Result<CaseStudyRecord, AppError> {
        if patch.is_empty() {
            return Err(AppError::validation("update carries no fields"));
        }

        let record = self.store.update_case_study(id, patch).await?;
        self.caches.invalidate(CollectionKey::CaseStudies);
        info!(case_study_id = %record.id, "Case study updated");
        Ok(record)
    }

    /// Idempotent: deleting an already-deleted case study still succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = self.try_delete(id).await;
        self.publish_outcome(Verb::Delete, &result);
        result
    }

    async fn try_delete(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_case_study(id).await?;
        self.caches.invalidate(CollectionKey::CaseStudies);
        info!(case_study_id = %id, "Case study deleted");
        Ok(())
    }

    fn publish_outcome<T>(&self, verb: Verb, result: &Result<T, AppError>) {
        let outcome = match result {
            Ok(_) => Outcome::Succeeded,
            Err(err) => Outcome::failed(err.user_message()),
        };
        self.events.publish(EntityKind::CaseStudy, verb, outcome);
    }
}
