//! Proposal handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::stores::{NewProposal, ProposalPatch};

use super::super::error::ApiError;
use super::super::state::ApiState;

pub async fn list_project_proposals(
    State(state): State<ApiState>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .proposals
        .list_for_project(project_id)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(rows))
}

pub async fn create_proposal(
    State(state): State<ApiState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<NewProposal>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .proposals
        .create(project_id, input)
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_proposal(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProposalPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .proposals
        .update(id, patch)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(record))
}

pub async fn delete_proposal(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.proposals.delete(id).await.map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
