//! Static insight templates.
//!
//! There is no analysis pipeline behind insight generation; drafts are
//! assembled from a fixed template bank, lightly specialized by the
//! project's industry. The output is deterministic for a given project,
//! which the tests rely on.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DiscoveryQuestion, ProjectRecord};

/// The field set of an insight before the store assigns identity and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightDraft {
    pub summary: String,
    pub challenges: Vec<String>,
    pub discovery_questions: Vec<DiscoveryQuestion>,
    pub value_propositions: Vec<String>,
}

const BASE_CHALLENGES: &[&str] = &[
    "Legacy Systems",
    "Data Silos",
    "Integration Gaps",
    "Manual Processes",
    "Security Concerns",
    "Scalability Issues",
];

const VALUE_PROPOSITIONS: &[&str] = &[
    "40% faster time-to-market with modern cloud infrastructure",
    "Scalable architecture supporting 10x growth",
    "Advanced AI analytics for data-driven decisions",
    "Enterprise-grade security and compliance",
    "24/7 automated monitoring and support",
];

const QUESTION_BANK: &[(&str, &[&str])] = &[
    (
        "Current State",
        &[
            "What are your current pain points with existing systems?",
            "How many legacy applications are currently in use?",
            "What is your current data infrastructure?",
        ],
    ),
    (
        "Business Goals",
        &[
            "What are your key business objectives for this transformation?",
            "What is your timeline for implementation?",
            "What ROI are you expecting?",
        ],
    ),
    (
        "Technical Requirements",
        &[
            "What are your security and compliance requirements?",
            "What is your preferred cloud platform?",
            "Do you have existing API integrations?",
        ],
    ),
];

/// Build the insight draft for a project.
pub fn draft_for_project(project: &ProjectRecord) -> InsightDraft {
    let summary = format!(
        "{client} is seeking a comprehensive digital transformation to modernize \
         their legacy systems and improve operational efficiency in the \
         {industry} sector. Key focus areas include cloud migration, data \
         analytics, and process automation.",
        client = project.client,
        industry = project.industry,
    );

    let mut challenges: Vec<String> = BASE_CHALLENGES.iter().map(|c| (*c).to_string()).collect();
    if let Some(extra) = industry_challenge(&project.industry) {
        challenges.push(extra.to_string());
    }

    let discovery_questions = QUESTION_BANK
        .iter()
        .flat_map(|(category, questions)| {
            questions.iter().map(|question| DiscoveryQuestion {
                category: (*category).to_string(),
                question: (*question).to_string(),
            })
        })
        .collect();

    InsightDraft {
        summary,
        challenges,
        discovery_questions,
        value_propositions: VALUE_PROPOSITIONS.iter().map(|v| (*v).to_string()).collect(),
    }
}

fn industry_challenge(industry: &str) -> Option<&'static str> {
    let normalized = industry.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "healthcare" => Some("Regulatory Compliance (HIPAA)"),
        "finance" | "financial services" => Some("Audit & Reporting Overhead"),
        "insurance" => Some("Claims Backlog"),
        "retail" => Some("Seasonal Demand Spikes"),
        "manufacturing" => Some("Unplanned Equipment Downtime"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::domain::types::ProjectStatus;

    fn sample_project(industry: &str) -> ProjectRecord {
        ProjectRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Healthcare Cloud Migration".into(),
            client: "Medinova".into(),
            industry: industry.into(),
            project_type: None,
            region: None,
            rfp_file_url: None,
            status: ProjectStatus::New,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn draft_mentions_client_and_industry() {
        let draft = draft_for_project(&sample_project("Healthcare"));
        assert!(draft.summary.contains("Medinova"));
        assert!(draft.summary.contains("Healthcare"));
    }

    #[test]
    fn known_industry_appends_specific_challenge() {
        let draft = draft_for_project(&sample_project("Healthcare"));
        assert_eq!(draft.challenges.len(), BASE_CHALLENGES.len() + 1);
        assert_eq!(
            draft.challenges.last().map(String::as_str),
            Some("Regulatory Compliance (HIPAA)")
        );
    }

    #[test]
    fn unknown_industry_keeps_base_challenges() {
        let draft = draft_for_project(&sample_project("Aerospace"));
        assert_eq!(draft.challenges.len(), BASE_CHALLENGES.len());
    }

    #[test]
    fn draft_is_deterministic() {
        let project = sample_project("Retail");
        assert_eq!(draft_for_project(&project), draft_for_project(&project));
    }

    #[test]
    fn questions_cover_every_category() {
        let draft = draft_for_project(&sample_project("Finance"));
        for (category, _) in QUESTION_BANK {
            assert!(
                draft
                    .discovery_questions
                    .iter()
                    .any(|q| q.category == *category),
                "missing category {category}"
            );
        }
    }
}
