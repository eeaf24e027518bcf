//! Uploads walk and retitle loop
//!
//! - `walker`: follows page tokens through a playlist, one page at a time
//! - `retitler`: filters each page and rewrites raw titles until the listing
//!   ends or the platform reports the quota as spent

pub mod retitler;
pub mod walker;

#[cfg(test)]
mod fake;

pub use retitler::{FailedUpdate, Retitler, RunOutcome, RunPolicy, RunReport, TitleChange};
pub use walker::{Page, PageWalker};
