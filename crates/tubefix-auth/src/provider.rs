//! Credential provider trait and the file-backed implementation

use async_trait::async_trait;

use crate::flow::{OAuthFlow, refresh_token};
use crate::token::{Credential, REFRESH_MARGIN_SECS, TokenData, TokenStore};
use crate::Result;

/// Source of a valid credential for one run.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn credential(&self) -> Result<Credential>;
}

/// Token file on disk, refreshed or re-consented as needed.
pub struct FileAuthProvider {
    store: TokenStore,
    flow: OAuthFlow,
}

impl FileAuthProvider {
    pub fn new(store: TokenStore, flow: OAuthFlow) -> Self {
        Self { store, flow }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Run the consent flow regardless of any stored token and save the result.
    pub async fn login(&self) -> Result<TokenData> {
        let token = self.flow.run().await?;
        self.store.save(&token)?;
        Ok(token)
    }

    /// A usable token without user interaction, if one can be had.
    ///
    /// Tokens that would expire within [`REFRESH_MARGIN_SECS`] are refreshed
    /// up front, since the run holds one credential from start to finish.
    async fn stored_or_refreshed(&self) -> Option<TokenData> {
        let token = self.store.load()?;
        if !token.expires_within(REFRESH_MARGIN_SECS) {
            tracing::debug!("Using stored OAuth token");
            return Some(token);
        }

        let still_valid = !token.is_expired();
        if token.refresh_token.is_none() {
            if still_valid {
                tracing::info!("Stored token expires soon and cannot be refreshed");
                return Some(token);
            }
            tracing::info!("Stored token expired and cannot be refreshed");
            return None;
        }

        match refresh_token(&token, &self.flow.token_url, &self.flow.client).await {
            Ok(refreshed) => {
                if let Err(e) = self.store.save(&refreshed) {
                    tracing::warn!("Failed to persist refreshed token: {}", e);
                }
                Some(refreshed)
            }
            Err(e) if still_valid => {
                tracing::warn!("Token refresh failed, using the current token: {}", e);
                Some(token)
            }
            Err(e) => {
                tracing::warn!("Token refresh failed, falling back to consent: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl AuthProvider for FileAuthProvider {
    async fn credential(&self) -> Result<Credential> {
        if let Some(token) = self.stored_or_refreshed().await {
            return Ok(token.credential());
        }
        Ok(self.login().await?.credential())
    }
}
