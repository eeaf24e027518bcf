//! In-process stand-in for the YouTube Data API used by integration tests.
//!
//! Serves `channels`, `playlistItems` and `videos` under a random local port,
//! paginating a fixed list of videos and recording every update body.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";
pub const UPLOADS: &str = "UUfake";

#[derive(Default)]
pub struct FakeState {
    /// `(video_id, title)` in playlist order.
    pub videos: Vec<(String, String)>,
    /// Updates for these ids answer 403 quotaExceeded.
    pub quota_ids: HashSet<String>,
    /// Updates for these ids answer 500.
    pub broken_ids: HashSet<String>,
    pub updates: Vec<Value>,
    pub page_requests: Vec<HashMap<String, String>>,
    pub no_channel: bool,
}

pub type Shared = Arc<Mutex<FakeState>>;

/// Start the fake and return its base URL plus the shared state.
pub async fn start(state: FakeState) -> (String, Shared) {
    let shared: Shared = Arc::new(Mutex::new(state));
    let app = Router::new()
        .route("/channels", get(channels))
        .route("/playlistItems", get(playlist_items))
        .route("/videos", put(update_video))
        .with_state(shared.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{}", addr), shared)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn google_error(status: StatusCode, reason: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message,
                "errors": [{"domain": "youtube", "reason": reason, "message": message}]
            }
        })),
    )
}

async fn channels(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return google_error(StatusCode::UNAUTHORIZED, "authError", "Invalid Credentials");
    }
    assert_eq!(query.get("mine").map(String::as_str), Some("true"));
    if state.lock().unwrap().no_channel {
        return (StatusCode::OK, Json(json!({"items": []})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "items": [{"contentDetails": {"relatedPlaylists": {"likes": "", "uploads": UPLOADS}}}]
        })),
    )
}

async fn playlist_items(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return google_error(StatusCode::UNAUTHORIZED, "authError", "Invalid Credentials");
    }
    if query.get("playlistId").map(String::as_str) != Some(UPLOADS) {
        return google_error(StatusCode::NOT_FOUND, "playlistNotFound", "Playlist not found");
    }

    let mut state = state.lock().unwrap();
    state.page_requests.push(query.clone());

    let page_size: usize = query
        .get("maxResults")
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);
    let offset: usize = query
        .get("pageToken")
        .and_then(|t| t.strip_prefix("offset-"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let total = state.videos.len();
    let end = (offset + page_size).min(total);
    let items: Vec<Value> = state.videos[offset..end]
        .iter()
        .map(|(id, title)| {
            json!({
                "kind": "youtube#playlistItem",
                "snippet": {"title": title, "playlistId": UPLOADS},
                "contentDetails": {"videoId": id}
            })
        })
        .collect();

    let mut body = json!({
        "items": items,
        "pageInfo": {"totalResults": total, "resultsPerPage": page_size}
    });
    if end < total {
        body["nextPageToken"] = json!(format!("offset-{}", end));
    }
    (StatusCode::OK, Json(body))
}

async fn update_video(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return google_error(StatusCode::UNAUTHORIZED, "authError", "Invalid Credentials");
    }
    assert_eq!(query.get("part").map(String::as_str), Some("snippet"));

    let id = body["id"].as_str().unwrap_or_default().to_string();
    let mut state = state.lock().unwrap();
    if state.quota_ids.contains(&id) {
        return google_error(
            StatusCode::FORBIDDEN,
            "quotaExceeded",
            "The request cannot be completed because you have exceeded your quota.",
        );
    }
    if state.broken_ids.contains(&id) {
        return google_error(StatusCode::INTERNAL_SERVER_ERROR, "backendError", "Backend Error");
    }
    state.updates.push(body.clone());
    (StatusCode::OK, Json(body))
}
