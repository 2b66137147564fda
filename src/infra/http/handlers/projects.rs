//! Project handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::stores::{NewProject, ProjectPatch};

use super::super::error::ApiError;
use super::super::middleware::MaybeIdentity;
use super::super::state::ApiState;

pub async fn list_projects(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state.projects.load().await.map_err(ApiError::from)?;
    Ok(Json(rows.to_vec()))
}

pub async fn get_project(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    match state.projects.find(id).await.map_err(ApiError::from)? {
        Some(project) => Ok(Json(project)),
        None => Err(ApiError::not_found("project not found")),
    }
}

pub async fn create_project(
    State(state): State<ApiState>,
    Extension(MaybeIdentity(identity)): Extension<MaybeIdentity>,
    Json(input): Json<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .projects
        .create(identity.as_ref(), input)
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_project(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .projects
        .update(id, patch)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(record))
}

pub async fn delete_project(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.projects.delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
