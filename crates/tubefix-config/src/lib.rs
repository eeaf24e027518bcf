use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hard ceiling the listing endpoint accepts for `maxResults`.
pub const MAX_PAGE_SIZE: u32 = 50;

pub const CLIENT_ID_ENV: &str = "TUBEFIX_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "TUBEFIX_CLIENT_SECRET";

/// Fallback secrets file looked up in the working directory.
pub const DEFAULT_CLIENT_SECRETS: &str = "client_secrets.json";

/// Configuration for tubefix (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oauth: OAuthConfig,

    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Google `client_secrets.json` downloaded from the cloud console.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secrets: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Where the OAuth token is persisted between runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<PathBuf>,

    /// Loopback port for the consent redirect; 0 picks a free port.
    #[serde(default)]
    pub redirect_port: u16,

    #[serde(default = "default_consent_timeout")]
    pub consent_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pause after each successful update.
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_secrets: None,
            client_id: None,
            client_secret: None,
            token_path: None,
            redirect_port: 0,
            consent_timeout_secs: default_consent_timeout(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            update_interval_ms: default_update_interval(),
        }
    }
}

fn default_consent_timeout() -> u64 {
    120
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_update_interval() -> u64 {
    1000
}

/// OAuth client registration used for consent and token refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Shape of Google's downloaded `client_secrets.json`.
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecretsEntry>,
    web: Option<ClientSecretsEntry>,
}

#[derive(Debug, Deserialize)]
struct ClientSecretsEntry {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Read a Google `client_secrets.json` (`installed` or `web` app).
    pub fn from_secrets_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ClientSecretsFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid client secrets file {}", path.display()))?;
        let entry = file.installed.or(file.web).with_context(|| {
            format!(
                "{} has neither an \"installed\" nor a \"web\" section",
                path.display()
            )
        })?;
        Ok(Self {
            client_id: entry.client_id,
            client_secret: entry.client_secret,
        })
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.run.page_size == 0 || self.run.page_size > MAX_PAGE_SIZE {
            anyhow::bail!(
                "run.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.run.page_size
            );
        }
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = Self::project_dirs() {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.tubefix/config.toml")
        }
    }

    /// Token file location, from config or the platform data dir.
    pub fn token_path(&self) -> PathBuf {
        if let Some(path) = &self.oauth.token_path {
            return path.clone();
        }
        if let Some(dirs) = Self::project_dirs() {
            dirs.data_dir().join("token.json")
        } else {
            PathBuf::from("~/.tubefix/token.json")
        }
    }

    /// Resolve OAuth client credentials from the process environment,
    /// the config file, or a client secrets file.
    pub fn client_credentials(&self) -> anyhow::Result<ClientCredentials> {
        self.resolve_client_credentials(|key| std::env::var(key).ok())
    }

    fn resolve_client_credentials(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<ClientCredentials> {
        let client_id = env(CLIENT_ID_ENV).or_else(|| self.oauth.client_id.clone());
        let client_secret = env(CLIENT_SECRET_ENV).or_else(|| self.oauth.client_secret.clone());
        if let (Some(client_id), Some(client_secret)) = (client_id, client_secret) {
            return Ok(ClientCredentials {
                client_id,
                client_secret,
            });
        }

        if let Some(path) = &self.oauth.client_secrets {
            return ClientCredentials::from_secrets_file(path);
        }

        let local = PathBuf::from(DEFAULT_CLIENT_SECRETS);
        if local.exists() {
            return ClientCredentials::from_secrets_file(&local);
        }

        anyhow::bail!(
            "No OAuth client configured. Set {} and {}, or point oauth.client_secrets in {} \
             at the client_secrets.json from the Google Cloud console.",
            CLIENT_ID_ENV,
            CLIENT_SECRET_ENV,
            Self::config_path().display()
        )
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "tubefix", "tubefix")
    }
}
