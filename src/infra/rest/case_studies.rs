use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::application::stores::{CaseStudiesStore, CaseStudyPatch, NewCaseStudy, StoreError};
use crate::domain::entities::CaseStudyRecord;

use super::RestTables;

const TABLE: &str = "case_studies";

#[derive(Serialize)]
struct InsertCaseStudy<'a> {
    user_id: Uuid,
    #[serde(flatten)]
    input: &'a NewCaseStudy,
}

#[async_trait]
impl CaseStudiesStore for RestTables {
    async fn list_case_studies(&self) -> Result<Vec<CaseStudyRecord>, StoreError> {
        self.fetch_rows(TABLE, "created_at.desc").await
    }

    async fn insert_case_study(
        &self,
        owner: Uuid,
        input: NewCaseStudy,
    ) -> Result<CaseStudyRecord, StoreError> {
        self.insert_row(
            TABLE,
            &InsertCaseStudy {
                user_id: owner,
                input: &input,
            },
        )
        .await
    }

    async fn update_case_study(
        &self,
        id: Uuid,
        patch: CaseStudyPatch,
    ) -> Result<CaseStudyRecord, StoreError> {
        self.update_row(TABLE, id, &patch).await
    }

    async fn delete_case_study(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_rows(TABLE, "id", id).await
    }
}
