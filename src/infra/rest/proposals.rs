use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::application::stores::{NewProposal, ProposalPatch, ProposalsStore, StoreError};
use crate::domain::entities::ProposalRecord;

use super::RestTables;

const TABLE: &str = "proposals";

#[derive(Serialize)]
struct InsertProposal<'a> {
    project_id: Uuid,
    #[serde(flatten)]
    input: &'a NewProposal,
}

#[async_trait]
impl ProposalsStore for RestTables {
    async fn list_proposals_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<ProposalRecord>, StoreError> {
        self.fetch_rows_eq(TABLE, "project_id", project_id, "created_at.desc")
            .await
    }

    async fn insert_proposal(
        &self,
        project_id: Uuid,
        input: NewProposal,
    ) -> Result<ProposalRecord, StoreError> {
        self.insert_row(
            TABLE,
            &InsertProposal {
                project_id,
                input: &input,
            },
        )
        .await
    }

    async fn update_proposal(
        &self,
        id: Uuid,
        patch: ProposalPatch,
    ) -> Result<ProposalRecord, StoreError> {
        self.update_row(TABLE, id, &patch).await
    }

    async fn delete_proposal(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_rows(TABLE, "id", id).await
    }

    async fn delete_proposals_for_project(&self, project_id: Uuid) -> Result<(), StoreError> {
        self.delete_rows(TABLE, "project_id", project_id).await
    }
}
