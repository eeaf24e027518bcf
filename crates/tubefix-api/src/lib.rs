pub mod client;
pub mod wire;
pub mod youtube;

pub use client::PlatformClient;
pub use youtube::{BASE_URL, YoutubeClient};
