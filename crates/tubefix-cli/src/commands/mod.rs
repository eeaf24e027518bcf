pub mod auth;
pub mod config;
pub mod run;
pub mod title;

use anyhow::Result;
use tubefix_auth::{FileAuthProvider, OAuthFlow, TokenStore};
use tubefix_config::Config;

/// Token store for the configured token path.
pub fn token_store(config: &Config) -> TokenStore {
    TokenStore::new(config.token_path())
}

/// File-backed provider wired to the configured OAuth client.
pub fn auth_provider(config: &Config) -> Result<FileAuthProvider> {
    let client = config.client_credentials()?;
    let flow = OAuthFlow::from_config(client, &config.oauth);
    Ok(FileAuthProvider::new(token_store(config), flow))
}
