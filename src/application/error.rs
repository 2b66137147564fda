use thiserror::Error;

use crate::domain::error::DomainError;
use crate::infra::error::InfraError;

use super::stores::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// A write requiring an acting identity was attempted without one.
    /// Rejected before any store call.
    #[error("not authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Message used as the notification description for failed operations.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthenticated => "Not authenticated".to_string(),
            other => other.to_string(),
        }
    }
}
