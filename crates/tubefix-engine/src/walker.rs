use tubefix_api::PlatformClient;
use tubefix_core::{Result, VideoItem};

/// One fetched page of the playlist.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based position in the walk.
    pub number: usize,
    pub items: Vec<VideoItem>,
    /// Whether the platform handed out a token for another page.
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Sequential, single-use walk over a paginated playlist listing.
///
/// Each call to [`PageWalker::next_page`] fetches exactly one page using the
/// token from the previous response. Once the listing reports no further
/// token the walker is exhausted and keeps returning `None`.
pub struct PageWalker<'a, C: PlatformClient + ?Sized> {
    client: &'a C,
    playlist_id: String,
    page_size: u32,
    cursor: Cursor,
    pages_fetched: usize,
    total_results: Option<u64>,
}

impl<'a, C: PlatformClient + ?Sized> PageWalker<'a, C> {
    pub fn new(client: &'a C, playlist_id: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            playlist_id: playlist_id.into(),
            page_size,
            cursor: Cursor::Start,
            pages_fetched: 0,
            total_results: None,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Item count the platform reported on the first page, if any.
    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }

    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        let token = match &self.cursor {
            Cursor::Exhausted => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token.as_str()),
        };

        let response = self
            .client
            .playlist_items(&self.playlist_id, token, self.page_size)
            .await?;

        self.pages_fetched += 1;
        if self.total_results.is_none() {
            self.total_results = response.total_results;
        }

        let has_more = response.next_page_token.is_some();
        self.cursor = match response.next_page_token {
            Some(token) => Cursor::Next(token),
            None => Cursor::Exhausted,
        };

        tracing::debug!(
            page = self.pages_fetched,
            items = response.items.len(),
            has_more,
            "Fetched playlist page"
        );

        Ok(Some(Page {
            number: self.pages_fetched,
            items: response.items,
            has_more,
        }))
    }

    /// Drain the remaining pages into one list.
    pub async fn collect_all(mut self) -> Result<Vec<VideoItem>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.items);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakePlatform;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_walk_yields_every_item_once() {
        let platform = FakePlatform::with_videos(123);
        let items = PageWalker::new(&platform, "UU", 50)
            .collect_all()
            .await
            .unwrap();

        assert_eq!(items.len(), 123);
        let ids: HashSet<_> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids.len(), 123);
        assert_eq!(platform.page_calls(), vec![None, Some("p1".into()), Some("p2".into())]);
    }

    #[tokio::test]
    async fn test_walker_is_single_use() {
        let platform = FakePlatform::with_videos(3);
        let mut walker = PageWalker::new(&platform, "UU", 50);

        let page = walker.next_page().await.unwrap().unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.items.len(), 3);
        assert!(!page.has_more);
        assert_eq!(walker.total_results(), Some(3));
        assert!(walker.is_exhausted());

        assert!(walker.next_page().await.unwrap().is_none());
        assert!(walker.next_page().await.unwrap().is_none());
        assert_eq!(platform.page_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_playlist() {
        let platform = FakePlatform::with_videos(0);
        let mut walker = PageWalker::new(&platform, "UU", 50);
        let page = walker.next_page().await.unwrap().unwrap();
        assert!(page.items.is_empty());
        assert!(walker.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_error_propagates() {
        let mut platform = FakePlatform::with_videos(120);
        platform.fail_page = Some(2);
        let mut walker = PageWalker::new(&platform, "UU", 50);
        assert!(walker.next_page().await.is_ok());
        assert!(walker.next_page().await.is_err());
        assert_eq!(walker.pages_fetched(), 1);
    }
}
