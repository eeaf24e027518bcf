//! Core domain models and logic for tubefix
//!
//! This crate contains:
//! - Domain models (VideoItem, PageResponse, UpdatePayload)
//! - Title generation from raw upload filenames
//! - The fixed "needs cleanup" filter

pub mod error;
pub mod matcher;
pub mod titles;
pub mod video;

pub use error::{Error, Result};
pub use matcher::needs_cleanup;
pub use titles::{generate_title, title_for};
pub use video::{FailureKind, PageResponse, UpdateFailure, UpdatePayload, VideoItem};
