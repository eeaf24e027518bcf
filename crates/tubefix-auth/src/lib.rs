//! OAuth credentials for the YouTube Data API
//!
//! This crate provides:
//! - Token persistence (JSON file next to the user's data)
//! - The loopback consent flow and token refresh
//! - `AuthProvider`, the seam the rest of tubefix gets credentials through

pub mod error;
pub mod flow;
pub mod provider;
pub mod token;

pub use error::{AuthError, Result};
pub use flow::{AUTHORIZE_URL, ConsentSession, OAuthFlow, SCOPES, TOKEN_URL, refresh_token};
pub use provider::{AuthProvider, FileAuthProvider};
pub use token::{Credential, TokenData, TokenStore};
