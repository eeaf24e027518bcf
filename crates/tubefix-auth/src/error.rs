//! Error types for tubefix-auth

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Stored token has no refresh token")]
    MissingRefreshToken,

    #[error("Token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("Authorization was denied: {0}")]
    ConsentDenied(String),

    #[error("No authorization code in callback")]
    MissingCode,

    #[error("Timed out after {0}s waiting for browser consent")]
    ConsentTimeout(u64),

    #[error("Consent listener stopped before a callback arrived")]
    ConsentAborted,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
