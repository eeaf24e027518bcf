//! OAuth 2.0 authorization-code flow with a loopback redirect

use axum::{Router, extract::Query, http::StatusCode, response::Html, routing::get};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tubefix_config::{ClientCredentials, OAuthConfig};

use crate::token::{TokenData, now_unix};
use crate::{AuthError, Result};

/// Google OAuth endpoints.
pub const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/youtube"];

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Query string Google appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    token_type: Option<String>,
    scope: Option<String>,
}

impl TokenResponse {
    fn into_token(self, previous: Option<&TokenData>) -> TokenData {
        TokenData {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous.and_then(|t| t.refresh_token.clone())),
            expires_at: self.expires_in.map(|secs| now_unix() + secs),
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            scope: self
                .scope
                .or_else(|| previous.map(|t| t.scope.clone()))
                .unwrap_or_default(),
        }
    }
}

/// Interactive consent: open the browser, capture the code, exchange it.
pub struct OAuthFlow {
    pub authorize_url: String,
    pub token_url: String,
    pub client: ClientCredentials,
    pub scopes: Vec<String>,
    pub redirect_port: u16,
    pub timeout: Duration,
}

impl OAuthFlow {
    pub fn new(client: ClientCredentials) -> Self {
        Self {
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            client,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            redirect_port: 0,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn from_config(client: ClientCredentials, config: &OAuthConfig) -> Self {
        Self {
            redirect_port: config.redirect_port,
            timeout: Duration::from_secs(config.consent_timeout_secs),
            ..Self::new(client)
        }
    }

    /// Run the full flow: open browser -> capture code -> exchange for token.
    pub async fn run(&self) -> Result<TokenData> {
        let mut session = self.begin().await?;

        println!("Opening your browser to authorize tubefix.");
        println!("If it does not open, visit:\n{}", session.auth_url());
        open_browser(session.auth_url());

        let code = session.wait_for_code(self.timeout).await?;
        self.exchange_code(&code, session.redirect_uri()).await
    }

    /// Start the loopback listener and build the consent URL.
    pub async fn begin(&self) -> Result<ConsentSession> {
        let listener = TcpListener::bind(("127.0.0.1", self.redirect_port)).await?;
        let redirect_uri = format!("http://127.0.0.1:{}/", listener.local_addr()?.port());
        let state = random_state();

        let auth_url = reqwest::Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", self.client.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.scopes.join(" ").as_str()),
                ("state", state.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| AuthError::InvalidUrl(format!("{}: {}", self.authorize_url, e)))?;

        let (callback_tx, callback_rx) = oneshot::channel::<CallbackParams>();
        let callback_tx = Arc::new(Mutex::new(Some(callback_tx)));
        let expected_state = state;
        let app = Router::new().route(
            "/",
            get(move |Query(params): Query<CallbackParams>| {
                let callback_tx = callback_tx.clone();
                let expected_state = expected_state.clone();
                async move {
                    // Requests that do not carry our state leave the flow waiting
                    if params.state.as_deref() != Some(expected_state.as_str()) {
                        tracing::warn!("Ignoring OAuth callback with unexpected state");
                        return (
                            StatusCode::BAD_REQUEST,
                            Html("<h1>Unexpected request</h1><p>This link does not belong to the pending sign-in.</p>"),
                        );
                    }
                    let reply = if params.error.is_some() {
                        (
                            StatusCode::BAD_REQUEST,
                            Html("<h1>Authorization failed</h1><p>You can close this tab.</p>"),
                        )
                    } else {
                        (
                            StatusCode::OK,
                            Html("<h1>Authorized</h1><p>You can close this tab and return to the terminal.</p>"),
                        )
                    };
                    if let Some(tx) = callback_tx.lock().ok().and_then(|mut slot| slot.take()) {
                        let _ = tx.send(params);
                    }
                    reply
                }
            }),
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("OAuth callback server error: {}", e);
            }
        });

        tracing::debug!("Waiting for OAuth callback on {}", redirect_uri);

        Ok(ConsentSession {
            auth_url: auth_url.to_string(),
            redirect_uri,
            callback_rx,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Exchange an authorization code for access/refresh tokens.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenData> {
        let response = http_client()?
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", self.client.client_id.as_str()),
                ("client_secret", self.client.client_secret.as_str()),
            ])
            .send()
            .await?;

        let token = read_token_response(response).await?.into_token(None);
        tracing::info!("Obtained new OAuth token");
        Ok(token)
    }
}

/// A running loopback listener waiting for Google's redirect.
pub struct ConsentSession {
    auth_url: String,
    redirect_uri: String,
    callback_rx: oneshot::Receiver<CallbackParams>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ConsentSession {
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Wait for the redirect and return the authorization code.
    pub async fn wait_for_code(&mut self, timeout: Duration) -> Result<String> {
        let params = tokio::time::timeout(timeout, &mut self.callback_rx)
            .await
            .map_err(|_| AuthError::ConsentTimeout(timeout.as_secs()))?
            .map_err(|_| AuthError::ConsentAborted)?;

        if let Some(err) = params.error {
            return Err(AuthError::ConsentDenied(err));
        }
        params.code.ok_or(AuthError::MissingCode)
    }
}

impl Drop for ConsentSession {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Refresh an expired OAuth token.
pub async fn refresh_token(
    token: &TokenData,
    token_url: &str,
    client: &ClientCredentials,
) -> Result<TokenData> {
    let refresh = token
        .refresh_token
        .as_deref()
        .ok_or(AuthError::MissingRefreshToken)?;

    let response = http_client()?
        .post(token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
        ])
        .send()
        .await?;

    let refreshed = read_token_response(response).await?.into_token(Some(token));
    tracing::info!("Refreshed OAuth access token");
    Ok(refreshed)
}

fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?)
}

async fn read_token_response(response: reqwest::Response) -> Result<TokenResponse> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenEndpoint {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

fn open_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let spawned = std::process::Command::new("open").arg(url).spawn();

    #[cfg(target_os = "linux")]
    let spawned = std::process::Command::new("xdg-open").arg(url).spawn();

    #[cfg(target_os = "windows")]
    let spawned = std::process::Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn();

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let spawned: std::io::Result<std::process::Child> = Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "no browser launcher for this platform",
    ));

    if let Err(e) = spawned {
        tracing::warn!("Failed to open browser: {}", e);
    }
}
