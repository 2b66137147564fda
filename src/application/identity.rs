//! Identity resolution seam.

use async_trait::async_trait;

use crate::domain::identity::UserIdentity;

use super::stores::StoreError;

/// Resolves a bearer token to the identity it represents.
///
/// The HTTP layer consults this once per request and threads the resolved
/// identity into service calls explicitly; services never look identities
/// up themselves.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<UserIdentity>, StoreError>;
}
