//! Static bearer-token identity provider.
//!
//! Maps configured tokens to identities. A missing or unknown token
//! resolves to `None` rather than an error, so writes fail with the
//! authentication error instead of a transport one.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::identity::IdentityProvider;
use crate::application::stores::StoreError;
use crate::config::AuthSettings;
use crate::domain::identity::UserIdentity;

pub struct TokenRegistry {
    tokens: HashMap<String, UserIdentity>,
}

impl TokenRegistry {
    pub fn from_settings(auth: &AuthSettings) -> Self {
        let tokens = auth
            .tokens
            .iter()
            .map(|entry| {
                (
                    entry.token.clone(),
                    UserIdentity::new(entry.user_id, entry.email.clone()),
                )
            })
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for TokenRegistry {
    async fn resolve(&self, token: &str) -> Result<Option<UserIdentity>, StoreError> {
        Ok(self.tokens.get(token).cloned())
    }
}
