mod models;
mod provider;

pub use models::{EmbeddedVideo, VideoPage, VIDEO_NAMESPACE};
pub use provider::{HttpVideoProvider, VideoProvider};
