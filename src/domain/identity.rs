//! Acting identity attached to ownership-stamping operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user on whose behalf a write executes.
///
/// Identity resolution happens at the transport boundary; services receive
/// it as an explicit parameter rather than consulting ambient session state,
/// so ownership stamping is visible in every call site and trivially
/// testable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    pub email: String,
}

impl UserIdentity {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
