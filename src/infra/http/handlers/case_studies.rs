//! Case-study handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::stores::{CaseStudyPatch, NewCaseStudy};

use super::super::error::ApiError;
use super::super::middleware::MaybeIdentity;
use super::super::state::ApiState;

pub async fn list_case_studies(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state.case_studies.load().await.map_err(ApiError::from)?;
    Ok(Json(rows.to_vec()))
}

pub async fn create_case_study(
    State(state): State<ApiState>,
    Extension(MaybeIdentity(identity)): Extension<MaybeIdentity>,
    Json(input): Json<NewCaseStudy>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .case_studies
        .create(identity.as_ref(), input)
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_case_study(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CaseStudyPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .case_studies
        .update(id, patch)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(record))
}

pub async fn delete_case_study(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .case_studies
        .delete(id)
        .await
        .map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
