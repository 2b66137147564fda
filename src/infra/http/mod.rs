//! HTTP surface: a JSON API over the entity services.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use error::ApiError;
pub use middleware::MaybeIdentity;
pub use state::ApiState;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, patch},
};

use middleware::{log_responses, resolve_identity};

pub fn build_router(state: ApiState) -> Router {
    let identity_state = state.clone();

    Router::new()
        .route(
            "/api/v1/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/api/v1/projects/{id}",
            get(handlers::get_project)
                .patch(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/v1/projects/{id}/insights",
            get(handlers::list_project_insights).post(handlers::generate_insight),
        )
        .route(
            "/api/v1/projects/{id}/proposals",
            get(handlers::list_project_proposals).post(handlers::create_proposal),
        )
        .route(
            "/api/v1/case-studies",
            get(handlers::list_case_studies).post(handlers::create_case_study),
        )
        .route(
            "/api/v1/case-studies/{id}",
            patch(handlers::update_case_study).delete(handlers::delete_case_study),
        )
        .route("/api/v1/insights/{id}", delete(handlers::delete_insight))
        .route(
            "/api/v1/proposals/{id}",
            patch(handlers::update_proposal).delete(handlers::delete_proposal),
        )
        .route(
            "/api/v1/notifications",
            get(handlers::list_notifications),
        )
        .route("/health", get(health))
        .with_state(state)
        .layer(axum_middleware::from_fn_with_state(
            identity_state,
            resolve_identity,
        ))
        .layer(axum_middleware::from_fn(log_responses))
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}
