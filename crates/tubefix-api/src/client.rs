//! Platform client trait

use async_trait::async_trait;
use tubefix_core::{PageResponse, Result, UpdateFailure, UpdatePayload};

/// The calls the retitle loop makes against the video platform.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Id of the authenticated channel's uploads playlist.
    async fn uploads_playlist_id(&self) -> Result<String>;

    /// One page of a playlist, starting at `page_token` (first page when `None`).
    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<PageResponse>;

    /// Replace a video's snippet. Failures are values so callers can tell a
    /// quota stop from a one-off error.
    async fn update_video(&self, payload: &UpdatePayload) -> std::result::Result<(), UpdateFailure>;
}
