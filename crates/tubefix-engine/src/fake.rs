//! In-memory `PlatformClient` for engine tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tubefix_api::PlatformClient;
use tubefix_core::{Error, PageResponse, Result, UpdateFailure, UpdatePayload, VideoItem};

#[derive(Default)]
pub struct FakePlatform {
    pub videos: Vec<VideoItem>,
    /// Canned update failures by video id.
    pub failures: HashMap<String, UpdateFailure>,
    pub fail_channel: bool,
    /// 1-based page number whose fetch fails.
    pub fail_page: Option<usize>,
    page_calls: Mutex<Vec<Option<String>>>,
    attempts: Mutex<Vec<String>>,
    updates: Mutex<Vec<UpdatePayload>>,
}

impl FakePlatform {
    /// `n` videos, all with raw camera titles.
    pub fn with_videos(n: usize) -> Self {
        let videos = (1..=n)
            .map(|i| VideoItem::new(format!("v{i}"), format!("VID_20230714_{i}.mp4")))
            .collect();
        Self {
            videos,
            ..Default::default()
        }
    }

    /// One video per title, ids `v1`, `v2`, ...
    pub fn with_titles(titles: &[&str]) -> Self {
        let videos = titles
            .iter()
            .enumerate()
            .map(|(i, t)| VideoItem::new(format!("v{}", i + 1), *t))
            .collect();
        Self {
            videos,
            ..Default::default()
        }
    }

    pub fn fail_update(mut self, id: &str, failure: UpdateFailure) -> Self {
        self.failures.insert(id.to_string(), failure);
        self
    }

    pub fn page_calls(&self) -> Vec<Option<String>> {
        self.page_calls.lock().unwrap().clone()
    }

    /// Ids of every update call, successful or not, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<UpdatePayload> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformClient for FakePlatform {
    async fn uploads_playlist_id(&self) -> Result<String> {
        if self.fail_channel {
            return Err(Error::NoChannel);
        }
        Ok("UUfake".to_string())
    }

    async fn playlist_items(
        &self,
        _playlist_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<PageResponse> {
        let call = {
            let mut calls = self.page_calls.lock().unwrap();
            calls.push(page_token.map(String::from));
            calls.len()
        };
        if self.fail_page == Some(call) {
            return Err(Error::Http {
                endpoint: "playlistItems".into(),
                status: 500,
                message: "Backend Error".into(),
            });
        }

        let size = page_size as usize;
        let page_index: usize = page_token
            .and_then(|t| t.strip_prefix('p'))
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);
        let start = (page_index * size).min(self.videos.len());
        let end = (start + size).min(self.videos.len());

        Ok(PageResponse {
            items: self.videos[start..end].to_vec(),
            next_page_token: (end < self.videos.len()).then(|| format!("p{}", page_index + 1)),
            total_results: Some(self.videos.len() as u64),
        })
    }

    async fn update_video(&self, payload: &UpdatePayload) -> std::result::Result<(), UpdateFailure> {
        self.attempts.lock().unwrap().push(payload.id.clone());
        if let Some(failure) = self.failures.get(&payload.id) {
            return Err(failure.clone());
        }
        self.updates.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
