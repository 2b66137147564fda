//! Notification feed handler

use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::super::error::ApiError;
use super::super::state::ApiState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub limit: Option<usize>,
}

pub async fn list_notifications(
    State(state): State<ApiState>,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // Fold in anything the background consumer has not picked up yet so
    // the feed reflects operations that finished a moment ago.
    state.notifier.consume();

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    Ok(Json(state.notifier.recent(limit)))
}
