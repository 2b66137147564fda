use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::application::stores::{InsightsStore, StoreError};
use crate::domain::entities::InsightRecord;
use crate::domain::insights::InsightDraft;

use super::RestTables;

const TABLE: &str = "insights";

#[derive(Serialize)]
struct InsertInsight<'a> {
    project_id: Uuid,
    #[serde(flatten)]
    draft: &'a InsightDraft,
}

#[async_trait]
impl InsightsStore for RestTables {
    async fn list_insights_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<InsightRecord>, StoreError> {
        self.fetch_rows_eq(TABLE, "project_id", project_id, "created_at.desc")
            .await
    }

    async fn insert_insight(
        &self,
        project_id: Uuid,
        draft: InsightDraft,
    ) -> Result<InsightRecord, StoreError> {
        self.insert_row(
            TABLE,
            &InsertInsight {
                project_id,
                draft: &draft,
            },
        )
        .await
    }

    async fn delete_insight(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_rows(TABLE, "id", id).await
    }

    async fn delete_insights_for_project(&self, project_id: Uuid) -> Result<(), StoreError> {
        self.delete_rows(TABLE, "project_id", project_id).await
    }
}
