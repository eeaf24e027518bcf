//! Raw-filename detection for video titles

use lazy_static::lazy_static;
use regex::Regex;

/// Markers left behind by cameras, phones and editors when a file is
/// uploaded without renaming it.
pub const RAW_PATTERNS: &str = r"(video|output|pxl|img|vid|mov|_|\.mp4|untitled)";

lazy_static! {
    static ref RAW_RE: Regex = Regex::new(RAW_PATTERNS).unwrap();
}

/// Whether a title still looks like the uploaded filename.
pub fn needs_cleanup(title: &str) -> bool {
    RAW_RE.is_match(&title.to_lowercase())
}

/// The first marker found in `title`, if any.
pub fn matching_marker(title: &str) -> Option<String> {
    RAW_RE
        .find(&title.to_lowercase())
        .map(|m| m.as_str().to_string())
}
