//! Domain entities mirrored from the hosted table store.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::ProjectStatus;

/// A presales project owned by a single user.
///
/// `user_id` is stamped exactly once at creation from the acting identity;
/// no update path carries an owner field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub client: String,
    pub industry: String,
    pub project_type: Option<String>,
    pub region: Option<String>,
    pub rfp_file_url: Option<String>,
    pub status: ProjectStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A reference case study owned by a single user. Same ownership rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub industry: String,
    pub result: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A discovery question grouped under a category heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryQuestion {
    pub category: String,
    pub question: String,
}

/// Generated insight attached to a project.
///
/// The store normalizes challenges, questions, and value propositions into
/// child tables; this record flattens them (JSON columns on the wire) since
/// they are only ever read and written as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub summary: String,
    pub challenges: Vec<String>,
    pub discovery_questions: Vec<DiscoveryQuestion>,
    pub value_propositions: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Proposal draft attached to a project. Content is an opaque document tree
/// owned by the editor surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub template_type: Option<String>,
    pub content: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
