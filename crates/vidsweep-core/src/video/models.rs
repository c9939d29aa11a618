/// Namespace code for video pages in the platform page table
pub const VIDEO_NAMESPACE: i64 = 34;

/// A page in the video namespace, as stored by the platform
#[derive(Debug, Clone)]
pub struct VideoPage {
    pub id: i64,
    pub title: String,
    pub is_redirect: bool,
}

/// Per-run view of a video page together with its external host link.
/// Never persisted; built from the page id when a window is fetched.
#[derive(Debug, Clone)]
pub struct EmbeddedVideo {
    pub page: VideoPage,
    pub provider_url: Option<String>,
}
