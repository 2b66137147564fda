use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::application::stores::{NewProject, ProjectPatch, ProjectsStore, StoreError};
use crate::domain::entities::ProjectRecord;

use super::RestTables;

const TABLE: &str = "projects";

#[derive(Serialize)]
struct InsertProject<'a> {
    user_id: Uuid,
    #[serde(flatten)]
    input: &'a NewProject,
}

#[async_trait]
impl ProjectsStore for RestTables {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        self.fetch_rows(TABLE, "updated_at.desc").await
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        self.find_row(TABLE, id).await
    }

    async fn insert_project(
        &self,
        owner: Uuid,
        input: NewProject,
    ) -> Result<ProjectRecord, StoreError> {
        self.insert_row(
            TABLE,
            &InsertProject {
                user_id: owner,
                input: &input,
            },
        )
        .await
    }

    async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<ProjectRecord, StoreError> {
        self.update_row(TABLE, id, &patch).await
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_rows(TABLE, "id", id).await
    }
}
