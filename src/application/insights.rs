//! Insight generation over projects.
//!
//! Insights are produced from a static template bank keyed by the
//! project's industry, then persisted like any other row. Generation is a
//! write: it publishes an operation event and fails cleanly when the
//! project does not exist.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::InsightRecord;
use crate::domain::error::DomainError;
use crate::domain::insights::draft_for_project;
use crate::domain::types::EntityKind;

use super::error::AppError;
use super::events::{EventQueue, Outcome, Verb};
use super::stores::{InsightsStore, ProjectsStore};

#[derive(Clone)]
pub struct InsightService {
    store: Arc<dyn InsightsStore>,
    projects: Arc<dyn ProjectsStore>,
    events: Arc<EventQueue>,
}

impl InsightService {
    pub fn new(
        store: Arc<dyn InsightsStore>,
        projects: Arc<dyn ProjectsStore>,
        events: Arc<EventQueue>,
    ) -> Self {
        Self {
            store,
            projects,
            events,
        }
    }

    /// Generate and persist an insight for the given project.
    pub async fn generate(&self, project_id: Uuid) -> Result<InsightRecord, AppError> {
        let result = self.try_generate(project_id).await;
        self.publish_outcome(Verb::Generate, &result);
        result
    }

    async fn try_generate(&self, project_id: Uuid) -> Result<InsightRecord, AppError> {
        let project = self
            .projects
            .find_project(project_id)
            .await?
            .ok_or_else(|| DomainError::not_found("project"))?;

        let draft = draft_for_project(&project);
        let record = self.store.insert_insight(project_id, draft).await?;
        info!(insight_id = %record.id, project_id = %project_id, "Insight generated");
        Ok(record)
    }

    /// Insights for one project, newest first.
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<InsightRecord>, AppError> {
        self.store
            .list_insights_for_project(project_id)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = self
            .store
            .delete_insight(id)
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
        self.events.publish(EntityKind::Insight, verb, outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::application::stores::{NewProject, ProjectPatch, StoreError};
    use crate::domain::entities::ProjectRecord;
    use crate::domain::insights::InsightDraft;
    use crate::domain::types::ProjectStatus;

    struct SingleProjectStore {
        project: ProjectRecord,
    }

    #[async_trait]
    impl ProjectsStore for SingleProjectStore {
        async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
            Ok(vec![self.project.clone()])
        }

        async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
            Ok((self.project.id == id).then(|| self.project.clone()))
        }

        async fn insert_project(
            &self,
            _owner: Uuid,
            _input: NewProject,
        ) -> Result<ProjectRecord, StoreError> {
            unreachable!("not used in these tests")
        }

        async fn update_project(
            &self,
            _id: Uuid,
            _patch: ProjectPatch,
        ) -> Result<ProjectRecord, StoreError> {
            unreachable!("not used in these tests")
        }

        async fn delete_project(&self, _id: Uuid) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubInsightsStore {
        rows: Mutex<Vec<InsightRecord>>,
    }

    #[async_trait]
    impl InsightsStore for StubInsightsStore {
        async fn list_insights_for_project(
            &self,
            project_id: Uuid,
        ) -> Result<Vec<InsightRecord>, StoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.project_id == project_id)
                .cloned()
                .collect())
        }

        async fn insert_insight(
            &self,
            project_id: Uuid,
            draft: InsightDraft,
        ) -> Result<InsightRecord, StoreError> {
            let now = OffsetDateTime::now_utc();
            let record = InsightRecord {
                id: Uuid::new_v4(),
                project_id,
                summary: draft.summary,
                challenges: draft.challenges,
                discovery_questions: draft.discovery_questions,
                value_propositions: draft.value_propositions,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn delete_insight(&self, id: Uuid) -> Result<(), StoreError> {
            self.rows.lock().unwrap().retain(|row| row.id != id);
            Ok(())
        }

        async fn delete_insights_for_project(&self, project_id: Uuid) -> Result<(), StoreError> {
            self.rows
                .lock()
                .unwrap()
                .retain(|row| row.project_id != project_id);
            Ok(())
        }
    }

    fn project() -> ProjectRecord {
        let now = OffsetDateTime::now_utc();
        ProjectRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Claims Modernization".into(),
            client: "Assurix".into(),
            industry: "Insurance".into(),
            project_type: None,
            region: None,
            rfp_file_url: None,
            status: ProjectStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixture(project: ProjectRecord) -> (InsightService, Arc<EventQueue>) {
        let events = Arc::new(EventQueue::new());
        let service = InsightService::new(
            Arc::new(StubInsightsStore::default()),
            Arc::new(SingleProjectStore { project }),
            events.clone(),
        );
        (service, events)
    }

    #[tokio::test]
    async fn generate_persists_an_industry_flavored_insight() {
        let project = project();
        let (service, events) = fixture(project.clone());

        let record = service.generate(project.id).await.expect("generate");

        assert_eq!(record.project_id, project.id);
        assert!(record.summary.contains(&project.client));
        assert!(!record.challenges.is_empty());
        assert!(!record.discovery_questions.is_empty());

        let listed = service
            .list_for_project(project.id)
            .await
            .expect("list insights");
        assert_eq!(listed.len(), 1);

        let drained = events.drain(10);
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].verb, Verb::Generate);
        assert!(drained[0].outcome.is_success());
    }

    #[tokio::test]
    async fn generate_for_unknown_project_fails_with_event() {
        let (service, events) = fixture(project());

        let err = service
            .generate(Uuid::new_v4())
            .await
            .expect_err("unknown project");
        assert!(matches!(
            err,
            AppError::Domain(DomainError::NotFound { .. })
        ));

        let drained = events.drain(10);
        assert_eq!(drained.len(), 1);
        assert!(!drained[0].outcome.is_success());
    }
}
