//! In-process store backend.
//!
//! Backs the `memory` store backend for development and tests. Rows live in
//! `RwLock`-guarded vectors; ordering guarantees match the REST backend so
//! the two are interchangeable behind the store traits.

use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::stores::{
    CaseStudiesStore, CaseStudyPatch, InsightsStore, NewCaseStudy, NewProject, NewProposal,
    ProjectPatch, ProjectsStore, ProposalPatch, ProposalsStore, StoreError,
};
use crate::cache::lock::{rw_read, rw_write};
use crate::domain::entities::{CaseStudyRecord, InsightRecord, ProjectRecord, ProposalRecord};
use crate::domain::insights::InsightDraft;

const SOURCE: &str = "infra::memory";

#[derive(Default)]
struct Tables {
    projects: Vec<ProjectRecord>,
    case_studies: Vec<CaseStudyRecord>,
    insights: Vec<InsightRecord>,
    proposals: Vec<ProposalRecord>,
}

/// All four entity tables behind one lock.
#[derive(Default)]
pub struct MemoryTables {
    state: RwLock<Tables>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectsStore for MemoryTables {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let state = rw_read(&self.state, SOURCE, "list_projects");
        let mut rows = state.projects.clone();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        let state = rw_read(&self.state, SOURCE, "find_project");
        Ok(state.projects.iter().find(|row| row.id == id).cloned())
    }

    async fn insert_project(
        &self,
        owner: Uuid,
        input: NewProject,
    ) -> Result<ProjectRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let record = ProjectRecord {
            id: Uuid::new_v4(),
            user_id: owner,
            name: input.name,
            client: input.client,
            industry: input.industry,
            project_type: input.project_type,
            region: input.region,
            rfp_file_url: input.rfp_file_url,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        rw_write(&self.state, SOURCE, "insert_project")
            .projects
            .push(record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<ProjectRecord, StoreError> {
        let mut state = rw_write(&self.state, SOURCE, "update_project");
        let row = state
            .projects
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(client) = patch.client {
            row.client = client;
        }
        if let Some(industry) = patch.industry {
            row.industry = industry;
        }
        if let Some(project_type) = patch.project_type {
            row.project_type = Some(project_type);
        }
        if let Some(region) = patch.region {
            row.region = Some(region);
        }
        if let Some(rfp_file_url) = patch.rfp_file_url {
            row.rfp_file_url = Some(rfp_file_url);
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        row.updated_at = OffsetDateTime::now_utc();

        Ok(row.clone())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError> {
        rw_write(&self.state, SOURCE, "delete_project")
            .projects
            .retain(|row| row.id != id);
        Ok(())
    }
}

#[async_trait]
impl CaseStudiesStore for MemoryTables {
    async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, StoreError> {
        let state = rw_read(&self.state, SOURCE, "list_case_studies");
        let mut rows = state.case_studies.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_case_study(
        &self,
        owner: Uuid,
        input: NewCaseStudy,
    ) -> Result<CaseStudyRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let record = CaseStudyRecord {
            id: Uuid::new_v4(),
            user_id: owner,
            title: input.title,
            industry: input.industry,
            result: input.result,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        rw_write(&self.state, SOURCE, "insert_case_study")
            .case_studies
            .push(record.clone());
        Ok(record)
    }

    async fn update_case_study(
        &self,
        id: Uuid,
        patch: CaseStudyPatch,
    ) -> Result<CaseStudyRecord, StoreError> {
        let mut state = rw_write(&self.state, SOURCE, "update_case_study");
        let row = state
            .case_studies
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(industry) = patch.industry {
            row.industry = industry;
        }
        if let Some(result) = patch.result {
            row.result = result;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        row.updated_at = OffsetDateTime::now_utc();

        Ok(row.clone())
    }

    async fn delete_case_study(&self, id: Uuid) -> Result<(), StoreError> {
        rw_write(&self.state, SOURCE, "delete_case_study")
            .case_studies
            .retain(|row| row.id != id);
        Ok(())
    }
}

#[async_trait]
impl InsightsStore for MemoryTables {
    async fn list_insights_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<InsightRecord>, StoreError> {
        let state = rw_read(&self.state, SOURCE, "list_insights_for_project");
        let mut rows: Vec<_> = state
            .insights
            .iter()
            .filter(|row| row.project_id == project_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
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
        rw_write(&self.state, SOURCE, "insert_insight")
            .insights
            .push(record.clone());
        Ok(record)
    }

    async fn delete_insight(&self, id: Uuid) -> Result<(), StoreError> {
        rw_write(&self.state, SOURCE, "delete_insight")
            .insights
            .retain(|row| row.id != id);
        Ok(())
    }

    async fn delete_insights_for_project(&self, project_id: Uuid) -> Result<(), StoreError> {
        rw_write(&self.state, SOURCE, "delete_insights_for_project")
            .insights
            .retain(|row| row.project_id != project_id);
        Ok(())
    }
}

#[async_trait]
impl ProposalsStore for MemoryTables {
    async fn list_proposals_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ProposalRecord>, StoreError> {
        let state = rw_read(&self.state, SOURCE, "list_proposals_for_project");
        let mut rows: Vec<_> = state
            .proposals
            .iter()
            .filter(|row| row.project_id == project_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_proposal(
        &self,
        project_id: Uuid,
        input: NewProposal,
    ) -> Result<ProposalRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let record = ProposalRecord {
            id: Uuid::new_v4(),
            project_id,
            template_type: input.template_type,
            content: input.content,
            created_at: now,
            updated_at: now,
        };
        rw_write(&self.state, SOURCE, "insert_proposal")
            .proposals
            .push(record.clone());
        Ok(record)
    }

    async fn update_proposal(
        &self,
        id: Uuid,
        patch: ProposalPatch,
    ) -> Result<ProposalRecord, StoreError> {
        let mut state = rw_write(&self.state, SOURCE, "update_proposal");
        let row = state
            .proposals
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(template_type) = patch.template_type {
            row.template_type = Some(template_type);
        }
        if let Some(content) = patch.content {
            row.content = content;
        }
        row.updated_at = OffsetDateTime::now_utc();

        Ok(row.clone())
    }

    async fn delete_proposal(&self, id: Uuid) -> Result<(), StoreError> {
        rw_write(&self.state, SOURCE, "delete_proposal")
            .proposals
            .retain(|row| row.id != id);
        Ok(())
    }

    async fn delete_proposals_for_project(&self, project_id: Uuid) -> Result<(), StoreError> {
        rw_write(&self.state, SOURCE, "delete_proposals_for_project")
            .proposals
            .retain(|row| row.project_id != project_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProjectStatus;

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            client: "Acme".to_string(),
            industry: "Manufacturing".to_string(),
            project_type: None,
            region: None,
            rfp_file_url: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn projects_list_orders_by_update_recency() {
        let tables = MemoryTables::new();
        let owner = Uuid::new_v4();

        let first = tables
            .insert_project(owner, new_project("first"))
            .await
            .expect("insert first");
        let _second = tables
            .insert_project(owner, new_project("second"))
            .await
            .expect("insert second");

        // Touching the older row moves it to the front.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        tables
            .update_project(
                first.id,
                ProjectPatch {
                    status: Some(ProjectStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .expect("update first");

        let rows = tables.list_projects().await.expect("list");
        assert_eq!(rows[0].id, first.id);
    }

    #[tokio::test]
    async fn update_missing_project_is_not_found() {
        let tables = MemoryTables::new();
        let err = tables
            .update_project(
                Uuid::new_v4(),
                ProjectPatch {
                    name: Some("ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("missing row");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_is_silent_for_unknown_ids() {
        let tables = MemoryTables::new();
        tables
            .delete_project(Uuid::new_v4())
            .await
            .expect("no-op delete");
        tables
            .delete_case_study(Uuid::new_v4())
            .await
            .expect("no-op delete");
    }

    #[tokio::test]
    async fn cascade_helpers_remove_only_the_target_project_rows() {
        let tables = MemoryTables::new();
        let owner = Uuid::new_v4();
        let kept = tables
            .insert_project(owner, new_project("kept"))
            .await
            .expect("insert");
        let doomed = tables
            .insert_project(owner, new_project("doomed"))
            .await
            .expect("insert");

        for project in [&kept, &doomed] {
            tables
                .insert_proposal(
                    project.id,
                    NewProposal {
                        template_type: None,
                        content: serde_json::json!({}),
                    },
                )
                .await
                .expect("insert proposal");
        }

        tables
            .delete_proposals_for_project(doomed.id)
            .await
            .expect("cascade");

        assert_eq!(
            tables
                .list_proposals_for_project(kept.id)
                .await
                .expect("list")
                .len(),
            1
        );
        assert!(tables
            .list_proposals_for_project(doomed.id)
            .await
            .expect("list")
            .is_empty());
    }
}
