use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::domain::identity::UserIdentity;

use super::state::ApiState;

/// The identity resolved for this request, if any. Absent or unknown
/// tokens yield `MaybeIdentity(None)` rather than an early 401; reads are
/// open and writes decide for themselves.
#[derive(Clone)]
pub struct MaybeIdentity(pub Option<UserIdentity>);

pub async fn resolve_identity(
    State(state): State<ApiState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = bearer_token(&request);

    let identity = match token {
        Some(token) => match state.identity.resolve(token).await {
            Ok(identity) => identity,
            Err(err) => {
                warn!(error = %err, "identity resolution failed");
                None
            }
        },
        None => None,
    };

    request.extensions_mut().insert(MaybeIdentity(identity));
    next.run(request).await
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            %method,
            %uri,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request failed"
        );
    }

    response
}
