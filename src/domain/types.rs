//! Shared domain enumerations aligned with persisted store enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a project (mirrors the store enum `project_status`).
///
/// Serialized with the human-facing labels the store declares, so rows
/// round-trip unchanged through the table API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::New => "New",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "New" => Ok(ProjectStatus::New),
            "In Progress" => Ok(ProjectStatus::InProgress),
            "Completed" => Ok(ProjectStatus::Completed),
            "On Hold" => Ok(ProjectStatus::OnHold),
            _ => Err(()),
        }
    }
}

/// Entity kinds handled by the application services.
///
/// Used for operation events and notification copy; the cache layer has its
/// own, narrower key type for the collections it actually holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    CaseStudy,
    Insight,
    Proposal,
}

impl EntityKind {
    /// Lowercase label used in notification copy ("case study", not "case_study").
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::CaseStudy => "case study",
            EntityKind::Insight => "insight",
            EntityKind::Proposal => "proposal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_status_round_trips_store_labels() {
        for status in [
            ProjectStatus::New,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
        ] {
            let label = status.as_str();
            assert_eq!(ProjectStatus::try_from(label), Ok(status));

            let json = serde_json::to_string(&status).expect("serialize status");
            assert_eq!(json, format!("\"{label}\""));
        }
    }

    #[test]
    fn project_status_defaults_to_new() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::New);
    }

    #[test]
    fn unknown_status_label_is_rejected() {
        assert!(ProjectStatus::try_from("Archived").is_err());
    }
}
