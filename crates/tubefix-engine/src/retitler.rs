use std::time::Duration;
use tubefix_api::PlatformClient;
use tubefix_core::{Result, UpdateFailure, UpdatePayload, VideoItem, generate_title, needs_cleanup};

use crate::walker::PageWalker;

/// Knobs for a retitle run.
#[derive(Debug, Clone)]
pub struct RunPolicy {
    pub page_size: u32,
    /// Pause after each successful update.
    pub update_interval: Duration,
    /// Report what would change without calling the update endpoint.
    pub dry_run: bool,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            page_size: 50,
            update_interval: Duration::from_secs(1),
            dry_run: false,
        }
    }
}

/// How the run ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every page was walked.
    #[default]
    Done,
    /// The platform refused an update with 403; nothing after it was tried.
    QuotaExceeded {
        video_id: String,
        failure: UpdateFailure,
        /// Items after the refused one on the same page.
        unattempted_on_page: usize,
        /// Whether the listing had pages that were never fetched.
        more_pages: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleChange {
    pub video_id: String,
    pub old_title: String,
    pub new_title: String,
    /// False in dry-run mode.
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpdate {
    pub video_id: String,
    pub title: String,
    pub failure: UpdateFailure,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub pages: usize,
    pub scanned: usize,
    pub matched: usize,
    pub skipped: usize,
    pub changes: Vec<TitleChange>,
    pub failed: Vec<FailedUpdate>,
}

impl RunReport {
    pub fn updated(&self) -> usize {
        self.changes.iter().filter(|c| c.applied).count()
    }

    pub fn quota_exceeded(&self) -> bool {
        matches!(self.outcome, RunOutcome::QuotaExceeded { .. })
    }
}

/// What processing one item means for the rest of the run.
enum Step {
    Continue,
    Halt(UpdateFailure),
}

/// Walks the uploads playlist and rewrites every raw title it finds.
pub struct Retitler<'a, C: PlatformClient + ?Sized> {
    client: &'a C,
    policy: RunPolicy,
    title_fn: fn(&str) -> String,
}

impl<'a, C: PlatformClient + ?Sized> Retitler<'a, C> {
    pub fn new(client: &'a C, policy: RunPolicy) -> Self {
        Self {
            client,
            policy,
            title_fn: generate_title,
        }
    }

    /// Replace the title generator.
    pub fn with_title_fn(mut self, title_fn: fn(&str) -> String) -> Self {
        self.title_fn = title_fn;
        self
    }

    /// Run until the listing is exhausted or the quota runs out.
    ///
    /// Errors are returned only for failures outside the per-item update
    /// (channel lookup, page fetches); update failures end up in the report.
    pub async fn run(&self) -> Result<RunReport> {
        let playlist_id = self.client.uploads_playlist_id().await?;
        tracing::info!("Connected. Accessing uploads playlist {}", playlist_id);

        let mut walker = PageWalker::new(self.client, playlist_id, self.policy.page_size);
        let mut report = RunReport::default();

        while let Some(page) = walker.next_page().await? {
            report.pages += 1;
            let page_len = page.items.len();

            for (index, item) in page.items.into_iter().enumerate() {
                report.scanned += 1;
                if let Step::Halt(failure) = self.process(&item, &mut report).await {
                    let unattempted_on_page = page_len - index - 1;
                    tracing::warn!(
                        video_id = %item.id,
                        unattempted_on_page,
                        more_pages = page.has_more,
                        "Quota limit reached, stopping: {}",
                        failure
                    );
                    report.outcome = RunOutcome::QuotaExceeded {
                        video_id: item.id,
                        failure,
                        unattempted_on_page,
                        more_pages: page.has_more,
                    };
                    return Ok(report);
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            updated = report.updated(),
            failed = report.failed.len(),
            "All videos processed"
        );
        report.outcome = RunOutcome::Done;
        Ok(report)
    }

    async fn process(&self, item: &VideoItem, report: &mut RunReport) -> Step {
        if !needs_cleanup(&item.current_title) {
            report.skipped += 1;
            return Step::Continue;
        }
        report.matched += 1;

        let new_title = (self.title_fn)(&item.current_title);

        if self.policy.dry_run {
            tracing::info!("Would fix: {} -> {}", item.current_title, new_title);
            report.changes.push(TitleChange {
                video_id: item.id.clone(),
                old_title: item.current_title.clone(),
                new_title,
                applied: false,
            });
            return Step::Continue;
        }

        let payload = UpdatePayload::retitle(item.id.clone(), new_title);
        match self.client.update_video(&payload).await {
            Ok(()) => {
                tracing::info!("FIXED: {} -> {}", item.current_title, payload.title);
                report.changes.push(TitleChange {
                    video_id: item.id.clone(),
                    old_title: item.current_title.clone(),
                    new_title: payload.title,
                    applied: true,
                });
                if !self.policy.update_interval.is_zero() {
                    tokio::time::sleep(self.policy.update_interval).await;
                }
                Step::Continue
            }
            Err(failure) if failure.is_forbidden() => Step::Halt(failure),
            Err(failure) => {
                tracing::warn!("Error updating {}: {}", item.id, failure);
                report.failed.push(FailedUpdate {
                    video_id: item.id.clone(),
                    title: item.current_title.clone(),
                    failure,
                });
                Step::Continue
            }
        }
    }
}
