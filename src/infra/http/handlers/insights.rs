//! Insight handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use super::super::error::ApiError;
use super::super::state::ApiState;

pub async fn list_project_insights(
    State(state): State<ApiState>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .insights
        .list_for_project(project_id)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(rows))
}

pub async fn generate_insight(
    State(state): State<ApiState>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .insights
        .generate(project_id)
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_insight(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.insights.delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
