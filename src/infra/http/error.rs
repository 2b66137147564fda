use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::AppError;
use crate::application::stores::StoreError;
use crate::domain::error::DomainError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UNAUTHENTICATED: &str = "unauthenticated";
    pub const NOT_FOUND: &str = "not_found";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const STORE_TIMEOUT: &str = "store_timeout";
    pub const STORE: &str = "store_error";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            hint,
        }
    }

    pub fn bad_request(message: impl Into<String>, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::UNAUTHENTICATED,
            "Not authenticated",
            Some("supply a bearer token".to_string()),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL,
            "internal error",
            None,
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Unauthenticated => Self::unauthenticated(),
            AppError::Domain(DomainError::NotFound { entity }) => {
                Self::not_found(format!("{entity} not found"))
            }
            AppError::Validation(message) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                codes::INVALID_INPUT,
                "invalid input",
                Some(message),
            ),
            AppError::Store(StoreError::NotFound) => Self::not_found("resource not found"),
            AppError::Store(StoreError::Timeout) => Self::new(
                StatusCode::GATEWAY_TIMEOUT,
                codes::STORE_TIMEOUT,
                "store timeout",
                None,
            ),
            AppError::Store(StoreError::Rejected { message }) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                codes::INVALID_INPUT,
                "store rejected the request",
                Some(message),
            ),
            AppError::Store(StoreError::Transport(message)) => Self::new(
                StatusCode::BAD_GATEWAY,
                codes::STORE,
                "store unavailable",
                Some(message),
            ),
            AppError::Infra(_) | AppError::Unexpected(_) => Self::internal(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message,
                hint: self.hint,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_maps_to_401() {
        let err = ApiError::from(AppError::Unauthenticated);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, codes::UNAUTHENTICATED);
    }

    #[test]
    fn store_timeout_maps_to_504() {
        let err = ApiError::from(AppError::Store(StoreError::Timeout));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn domain_not_found_maps_to_404() {
        let err = ApiError::from(AppError::Domain(DomainError::not_found("project")));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "project not found");
    }
}
