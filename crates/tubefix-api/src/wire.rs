//! YouTube Data API v3 request and response bodies

use serde::{Deserialize, Serialize};
use tubefix_core::{PageResponse, UpdatePayload, VideoItem};

/// `channels.list?part=contentDetails`
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

impl ChannelListResponse {
    pub fn uploads_playlist_id(self) -> Option<String> {
        self.items
            .into_iter()
            .next()
            .and_then(|c| c.content_details.related_playlists.uploads)
    }
}

/// `playlistItems.list?part=snippet,contentDetails`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: Option<u64>,
}

impl From<PlaylistItemListResponse> for PageResponse {
    fn from(resp: PlaylistItemListResponse) -> Self {
        PageResponse {
            items: resp
                .items
                .into_iter()
                .map(|item| VideoItem::new(item.content_details.video_id, item.snippet.title))
                .collect(),
            next_page_token: resp.next_page_token.filter(|t| !t.is_empty()),
            total_results: resp.page_info.and_then(|p| p.total_results),
        }
    }
}

/// `videos.update?part=snippet` body.
#[derive(Debug, Serialize)]
pub struct VideoUpdateRequest<'a> {
    pub id: &'a str,
    pub snippet: VideoSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category_id: &'a str,
    pub tags: &'a [String],
}

impl<'a> From<&'a UpdatePayload> for VideoUpdateRequest<'a> {
    fn from(payload: &'a UpdatePayload) -> Self {
        Self {
            id: &payload.id,
            snippet: VideoSnippet {
                title: &payload.title,
                description: &payload.description,
                category_id: &payload.category_id,
                tags: &payload.tags,
            },
        }
    }
}

/// Google API error envelope: `{"error": {"code", "message", "errors": [...]}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub reason: Option<String>,
}

impl ErrorEnvelope {
    /// Parse an error body; falls back to the raw text when it is not JSON.
    pub fn describe(body: &str) -> (Option<String>, String) {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => {
                let reason = env.error.errors.into_iter().find_map(|e| e.reason);
                (reason, env.error.message)
            }
            Err(_) => (None, body.trim().to_string()),
        }
    }
}
