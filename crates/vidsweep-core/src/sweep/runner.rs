use chrono::{Datelike, Utc};

use crate::config::AppConfig;
use crate::mail::MailTransport;
use crate::storage::PageStore;
use crate::video::{EmbeddedVideo, VideoProvider};
use crate::Result;

use super::{alert, schedule};

/// Options for a single sweep invocation.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Report would-be removals without touching pages or sending mail
    pub dry_run: bool,
    /// Override the calendar day (0-based day of year) used for window
    /// selection. Defaults to today.
    pub day_of_year: Option<u32>,
}

/// Outcome of one sweep run, for the completion summary.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub total_pages: u64,
    pub offset: u64,
    pub checked: u64,
    pub unavailable: u64,
    pub removed: u64,
    pub skipped_over_cap: u64,
    pub missing_embed: u64,
    pub cap_exceeded: bool,
    pub alerts_sent: u64,
    pub alerts_failed: u64,
    pub dry_run: bool,
}

/// Removal-policy state threaded through the per-video step.
/// Read once at the end of the run to decide whether the alert goes out.
#[derive(Debug, Default)]
struct RunState {
    removed: u64,
    cap_exceeded: bool,
}

/// Run one sweep over the day's window of video pages.
///
/// Counts the table, derives the window from the calendar day, probes every
/// page's embedded video and removes unavailable ones up to the configured
/// cap. Unavailable videos past the cap are only logged; if any were passed
/// over, the alert mail goes out once the pass is complete. Storage and
/// probe faults abort the run, the next scheduled invocation retries.
pub async fn run_sweep(
    store: &dyn PageStore,
    provider: &dyn VideoProvider,
    mailer: &dyn MailTransport,
    config: &AppConfig,
    options: &SweepOptions,
) -> Result<SweepReport> {
    let max_check = config.sweep.max_check_videos;
    let max_remove = u64::from(config.sweep.max_remove_videos);

    let total_pages = store.count_video_pages().await?;
    let day = options.day_of_year.unwrap_or_else(|| Utc::now().ordinal0());
    let offset = schedule::window_offset(total_pages, max_check, day);

    tracing::info!(
        "Checking up to {} of {} video pages from offset {} (day {})",
        max_check,
        total_pages,
        offset,
        day
    );

    let videos = fetch_window(store, provider, offset, max_check).await?;

    let mut report = SweepReport {
        total_pages,
        offset,
        checked: 0,
        unavailable: 0,
        removed: 0,
        skipped_over_cap: 0,
        missing_embed: 0,
        cap_exceeded: false,
        alerts_sent: 0,
        alerts_failed: 0,
        dry_run: options.dry_run,
    };
    let mut state = RunState::default();

    for video in &videos {
        report.checked += 1;

        let url = match video.provider_url.as_deref() {
            Some(url) => url,
            None => {
                tracing::warn!(
                    "Video page {} ({}) has no provider link, skipping",
                    video.page.id,
                    video.page.title
                );
                report.missing_embed += 1;
                continue;
            }
        };

        if provider.is_available(url).await? {
            continue;
        }
        report.unavailable += 1;

        if options.dry_run {
            tracing::info!(
                "Would remove video page {} ({}): {} is unavailable",
                video.page.id,
                video.page.title,
                url
            );
            continue;
        }

        if state.removed >= max_remove {
            state.cap_exceeded = true;
            report.skipped_over_cap += 1;
            tracing::info!(
                "Not removing video page {} ({}): limit of {} removals already reached",
                video.page.id,
                video.page.title,
                max_remove
            );
            continue;
        }

        let embeds = store.delete_page_and_embeds(video.page.id).await?;
        state.removed += 1;
        tracing::info!(
            "Removed video page {} ({}) and {} article embeds, provider URL was {}",
            video.page.id,
            video.page.title,
            embeds,
            url
        );
    }

    report.removed = state.removed;
    report.cap_exceeded = state.cap_exceeded;

    if state.cap_exceeded {
        let (sent, failed) =
            alert::send_cap_alerts(mailer, &config.mail, config.sweep.max_remove_videos).await;
        report.alerts_sent = sent;
        report.alerts_failed = failed;
    }

    Ok(report)
}

/// Fetch the day's window of video pages and join each with its embed link.
/// Pure read, no side effects.
async fn fetch_window(
    store: &dyn PageStore,
    provider: &dyn VideoProvider,
    offset: u64,
    limit: u32,
) -> Result<Vec<EmbeddedVideo>> {
    let pages = store.select_video_pages(offset, limit).await?;

    let mut videos = Vec::with_capacity(pages.len());
    for page in pages {
        let provider_url = provider.provider_url(page.id).await?;
        videos.push(EmbeddedVideo { page, provider_url });
    }

    Ok(videos)
}
