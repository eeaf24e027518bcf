//! Video domain model

use std::fmt;

/// Category applied to every rewritten video (Autos & Vehicles).
pub const CATEGORY_ID: &str = "2";

/// Tags applied to every rewritten video, in order.
pub const TAGS: [&str; 5] = ["Road Trip", "Driving", "POV", "Travel", "Vlog"];

/// Appended to the new title to form the description.
pub const DESCRIPTION_FOOTER: &str = "Cruising through the scenic routes. #RoadTrip #POV #Driving";

/// One entry of the uploads playlist, as seen by the retitle loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoItem {
    pub id: String,
    pub current_title: String,
}

impl VideoItem {
    pub fn new(id: impl Into<String>, current_title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            current_title: current_title.into(),
        }
    }
}

/// One page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResponse {
    pub items: Vec<VideoItem>,
    /// `None` on the last page.
    pub next_page_token: Option<String>,
    pub total_results: Option<u64>,
}

/// New snippet for a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePayload {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub tags: Vec<String>,
}

impl UpdatePayload {
    /// Payload carrying `title` plus the fixed description, category and tags.
    pub fn retitle(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            description: format!("{title}\n\n{DESCRIPTION_FOOTER}"),
            title,
            category_id: CATEGORY_ID.to_string(),
            tags: TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 403: quota exhausted or the call is not permitted.
    Forbidden,
    Other,
}

/// Why a single update call did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFailure {
    pub kind: FailureKind,
    pub status: Option<u16>,
    /// Platform error reason, e.g. `quotaExceeded`.
    pub reason: Option<String>,
    pub message: String,
}

impl UpdateFailure {
    pub fn forbidden(reason: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Forbidden,
            status: Some(403),
            reason,
            message: message.into(),
        }
    }

    pub fn other(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Other,
            status,
            reason: None,
            message: message.into(),
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == FailureKind::Forbidden
    }
}

impl fmt::Display for UpdateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.reason) {
            (Some(status), Some(reason)) => write!(f, "HTTP {status} ({reason}): {}", self.message),
            (Some(status), None) => write!(f, "HTTP {status}: {}", self.message),
            (None, _) => f.write_str(&self.message),
        }
    }
}
