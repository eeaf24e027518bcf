//! Token data and its on-disk store

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::Result;

/// Access tokens are treated as expired this many seconds early.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// A token handed to a run must outlive the run; anything closer to expiry
/// than this is refreshed first.
pub const REFRESH_MARGIN_SECS: i64 = 600;

/// Stored OAuth token data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Unix timestamp when the access token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

pub(crate) fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl TokenData {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_unix())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at - EXPIRY_BUFFER_SECS,
            None => false,
        }
    }

    /// Whether the token expires within `secs` seconds from now.
    pub fn expires_within(&self, secs: i64) -> bool {
        self.expires_within_at(secs, now_unix())
    }

    pub fn expires_within_at(&self, secs: i64, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now + secs > expires_at,
            None => false,
        }
    }

    pub fn credential(&self) -> Credential {
        Credential {
            access_token: self.access_token.clone(),
            token_type: self.token_type.clone(),
        }
    }
}

/// What API calls need from a token: an immutable bearer value for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
}

impl Credential {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
        }
    }

    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// JSON file holding the token between runs.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token. A missing or unreadable file yields `None`.
    pub fn load(&self) -> Option<TokenData> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable token file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn save(&self, token: &TokenData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!("Saved OAuth token to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored token. Returns whether a file was deleted.
    pub fn delete(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: Option<i64>) -> TokenData {
        TokenData {
            access_token: "ya29.test".into(),
            refresh_token: Some("1//refresh".into()),
            expires_at,
            token_type: "Bearer".into(),
            scope: "https://www.googleapis.com/auth/youtube".into(),
        }
    }

    #[test]
    fn test_not_expired_when_no_expiry() {
        assert!(!token(None).is_expired());
    }

    #[test]
    fn test_expiry_buffer() {
        let t = token(Some(10_000));
        assert!(!t.is_expired_at(9_900));
        assert!(t.is_expired_at(9_941));
        assert!(t.is_expired_at(20_000));
    }

    #[test]
    fn test_expires_within_margin() {
        let t = token(Some(10_000));
        assert!(!t.expires_within_at(REFRESH_MARGIN_SECS, 9_000));
        assert!(t.expires_within_at(REFRESH_MARGIN_SECS, 9_880));
        assert!(!t.is_expired_at(9_880));
        assert!(!token(None).expires_within(REFRESH_MARGIN_SECS));
    }

    #[test]
    fn test_far_future_not_expired() {
        assert!(!token(Some(now_unix() + 3600)).is_expired());
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let parsed: TokenData = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(parsed.token_type, "Bearer");
        assert!(parsed.refresh_token.is_none());
        assert!(parsed.expires_at.is_none());
    }

    #[test]
    fn test_credential_header_and_debug() {
        let cred = token(None).credential();
        assert_eq!(cred.authorization_header(), "Bearer ya29.test");
        assert!(!format!("{:?}", cred).contains("ya29"));
    }

    #[test]
    fn test_store_save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("token.json"));

        assert!(store.load().is_none());
        store.save(&token(Some(1_700_000_000))).unwrap();
        assert_eq!(store.load(), Some(token(Some(1_700_000_000))));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        assert!(store.delete().unwrap());
        assert!(!store.delete().unwrap());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_store_reads_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(TokenStore::new(path).load().is_none());
    }
}
