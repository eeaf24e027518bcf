//! YouTube Data API v3 client: async reqwest wrapper.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tubefix_auth::Credential;
use tubefix_core::{Error, PageResponse, Result, UpdateFailure, UpdatePayload};

use crate::client::PlatformClient;
use crate::wire::{ChannelListResponse, ErrorEnvelope, PlaylistItemListResponse, VideoUpdateRequest};

pub const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl YoutubeClient {
    pub fn new(credential: Credential) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tubefix/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            credential,
        })
    }

    /// Point the client at another API root (used against local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, endpoint))
            .header("Authorization", self.credential.authorization_header())
            .query(params)
            .send()
            .await
            .map_err(|e| Error::Request(format!("{} request failed: {}", endpoint, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Request(format!("Failed to read {} response: {}", endpoint, e)))?;

        if !status.is_success() {
            let (_, message) = ErrorEnvelope::describe(&body);
            return Err(Error::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PlatformClient for YoutubeClient {
    /// Costs 1 quota unit.
    async fn uploads_playlist_id(&self) -> Result<String> {
        let resp: ChannelListResponse = self
            .get_json("channels", &[("part", "contentDetails"), ("mine", "true")])
            .await?;
        let id = resp.uploads_playlist_id().ok_or(Error::NoChannel)?;
        tracing::debug!("Uploads playlist: {}", id);
        Ok(id)
    }

    /// Costs 1 quota unit per page.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<PageResponse> {
        let max_results = page_size.to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let resp: PlaylistItemListResponse = self.get_json("playlistItems", &params).await?;
        Ok(resp.into())
    }

    /// Costs 50 quota units.
    async fn update_video(
        &self,
        payload: &UpdatePayload,
    ) -> std::result::Result<(), UpdateFailure> {
        let response = self
            .http
            .put(format!("{}/videos", self.base_url))
            .header("Authorization", self.credential.authorization_header())
            .query(&[("part", "snippet")])
            .json(&VideoUpdateRequest::from(payload))
            .send()
            .await
            .map_err(|e| UpdateFailure::other(None, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let (reason, message) = ErrorEnvelope::describe(&body);
        if status.as_u16() == 403 {
            Err(UpdateFailure::forbidden(reason, message))
        } else {
            let mut failure = UpdateFailure::other(Some(status.as_u16()), message);
            failure.reason = reason;
            Err(failure)
        }
    }
}
