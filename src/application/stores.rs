//! Store traits describing the hosted table backend.
//!
//! Each entity kind exposes the same four-operation surface: an ordered
//! list, an insert returning the stored row, a partial update returning the
//! updated row, and a delete that treats unknown identifiers as a no-op
//! (filter semantics of the remote store). Implementations live under
//! `infra::rest` (PostgREST) and `infra::memory` (tests, dev mode).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{CaseStudyRecord, InsightRecord, ProjectRecord, ProposalRecord};
use crate::domain::insights::InsightDraft;
use crate::domain::types::ProjectStatus;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store transport error: {0}")]
    Transport(String),
    #[error("store rejected the request: {message}")]
    Rejected { message: String },
    #[error("resource not found")]
    NotFound,
    #[error("store timeout")]
    Timeout,
}

impl StoreError {
    pub fn from_transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Field set for a new project. Owner and timestamps are supplied by the
/// service and store respectively, never by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    pub industry: String,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub rfp_file_url: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

/// Partial update for a project: unset fields keep their stored values.
/// There is deliberately no owner field here; ownership is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfp_file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.client.is_none()
            && self.industry.is_none()
            && self.project_type.is_none()
            && self.region.is_none()
            && self.rfp_file_url.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCaseStudy {
    pub title: String,
    pub industry: String,
    pub result: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseStudyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CaseStudyPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.industry.is_none()
            && self.result.is_none()
            && self.description.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProposal {
    #[serde(default)]
    pub template_type: Option<String>,
    #[serde(default = "default_proposal_content")]
    pub content: serde_json::Value,
}

fn default_proposal_content() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

impl ProposalPatch {
    pub fn is_empty(&self) -> bool {
        self.template_type.is_none() && self.content.is_none()
    }
}

#[async_trait]
pub trait ProjectsStore: Send + Sync {
    /// All projects, ordered by `updated_at` descending.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError>;

    /// Insert with the owner stamped from the acting identity. Exactly one
    /// row is returned.
    async fn insert_project(
        &self,
        owner: Uuid,
        input: NewProject,
    ) -> Result<ProjectRecord, StoreError>;

    async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<ProjectRecord, StoreError>;

    /// Deleting an unknown id succeeds silently.
    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CaseStudiesStore: Send + Sync {
    /// All case studies, ordered by `created_at` descending.
    async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, StoreError>;

    async fn insert_case_study(
        &self,
        owner: Uuid,
        input: NewCaseStudy,
    ) -> Result<CaseStudyRecord, StoreError>;

    async fn update_case_study(
        &self,
        id: Uuid,
        patch: CaseStudyPatch,
    ) -> Result<CaseStudyRecord, StoreError>;

    async fn delete_case_study(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait InsightsStore: Send + Sync {
    /// Insights for one project, newest first.
    async fn list_insights_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<InsightRecord>, StoreError>;

    async fn insert_insight(
        &self,
        project_id: Uuid,
        draft: InsightDraft,
    ) -> Result<InsightRecord, StoreError>;

    async fn delete_insight(&self, id: Uuid) -> Result<(), StoreError>;

    /// Cascade target: remove every insight attached to a project.
    async fn delete_insights_for_project(&self, project_id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProposalsStore: Send + Sync {
    /// Proposals for one project, newest first.
    async fn list_proposals_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ProposalRecord>, StoreError>;

    async fn insert_proposal(
        &self,
        project_id: Uuid,
        input: NewProposal,
    ) -> Result<ProposalRecord, StoreError>;

    async fn update_proposal(
        &self,
        id: Uuid,
        patch: ProposalPatch,
    ) -> Result<ProposalRecord, StoreError>;

    async fn delete_proposal(&self, id: Uuid) -> Result<(), StoreError>;

    /// Cascade target: remove every proposal attached to a project.
    async fn delete_proposals_for_project(&self, project_id: Uuid) -> Result<(), StoreError>;
}
