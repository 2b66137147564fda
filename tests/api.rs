//! HTTP API tests over the in-memory backend.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use prospecta::application::case_studies::CaseStudyService;
use prospecta::application::events::EventQueue;
use prospecta::application::identity::IdentityProvider;
use prospecta::application::insights::InsightService;
use prospecta::application::notify::Notifier;
use prospecta::application::projects::ProjectService;
use prospecta::application::proposals::ProposalService;
use prospecta::cache::CollectionCaches;
use prospecta::config::{AuthSettings, TokenEntry};
use prospecta::infra::http::{ApiState, build_router};
use prospecta::infra::memory::MemoryTables;
use prospecta::infra::tokens::TokenRegistry;

const TOKEN: &str = "test-token";

fn user_id() -> Uuid {
    Uuid::from_u128(0x1001)
}

fn app() -> Router {
    let tables = Arc::new(MemoryTables::new());
    let caches = Arc::new(CollectionCaches::default());
    let events = Arc::new(EventQueue::new());
    let notifier = Arc::new(Notifier::new(events.clone(), 100));

    let registry = TokenRegistry::from_settings(&AuthSettings {
        tokens: vec![TokenEntry {
            token: TOKEN.to_string(),
            user_id: user_id(),
            email: "api-test@example.com".to_string(),
        }],
    });
    let identity: Arc<dyn IdentityProvider> = Arc::new(registry);

    let state = ApiState {
        projects: Arc::new(ProjectService::new(
            tables.clone(),
            tables.clone(),
            tables.clone(),
            caches.clone(),
            events.clone(),
        )),
        case_studies: Arc::new(CaseStudyService::new(
            tables.clone(),
            caches.clone(),
            events.clone(),
        )),
        insights: Arc::new(InsightService::new(
            tables.clone(),
            tables.clone(),
            events.clone(),
        )),
        proposals: Arc::new(ProposalService::new(tables.clone(), tables, events)),
        notifier,
        identity,
    };

    build_router(state)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

fn new_project_body() -> Value {
    json!({
        "name": "Medinova Cloud Migration",
        "client": "Medinova",
        "industry": "Healthcare"
    })
}

#[tokio::test]
async fn create_without_token_is_401_unauthenticated() {
    let app = app();

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/v1/projects",
            None,
            Some(new_project_body()),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "unauthenticated");
}

#[tokio::test]
async fn create_with_token_stamps_the_configured_owner() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/v1/projects",
            Some(TOKEN),
            Some(new_project_body()),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["user_id"], user_id().to_string());
    assert_eq!(body["status"], "New");

    let response = app
        .oneshot(request(Method::GET, "/api/v1/projects", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn empty_patch_is_rejected_as_invalid_input() {
    let app = app();

    let response = app
        .oneshot(request(
            Method::PATCH,
            &format!("/api/v1/projects/{}", Uuid::new_v4()),
            Some(TOKEN),
            Some(json!({})),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn deleting_an_unknown_case_study_is_a_silent_no_op() {
    let app = app();

    let response = app
        .oneshot(request(
            Method::DELETE,
            &format!("/api/v1/case-studies/{}", Uuid::new_v4()),
            Some(TOKEN),
            None,
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn generate_insight_for_missing_project_is_404() {
    let app = app();

    let response = app
        .oneshot(request(
            Method::POST,
            &format!("/api/v1/projects/{}/insights", Uuid::new_v4()),
            Some(TOKEN),
            None,
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn notifications_reflect_completed_operations() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/v1/projects",
            Some(TOKEN),
            Some(new_project_body()),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(request(Method::GET, "/api/v1/notifications", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|n| n["title"].as_str())
        .collect();
    assert!(titles.contains(&"Project created successfully"));
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app();
    let response = app
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
