use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::AppConfig;
use crate::storage::Database;
use crate::{Error, Result};

const MAX_RETRIES: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 500;
const USER_AGENT: &str = "vidsweep/0.1 (video maintenance sweep)";

/// Capabilities the sweep needs from the external video host.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// The external host link embedded by the page, if it has one.
    async fn provider_url(&self, page_id: i64) -> Result<Option<String>>;

    /// Whether the hosted video behind the link is still reachable.
    /// `Ok(false)` means the host says it is gone; transport and protocol
    /// failures surface as errors instead of a verdict.
    async fn is_available(&self, provider_url: &str) -> Result<bool>;
}

/// Production provider: embed lookup from the platform database, liveness
/// probed over HTTP against the hosting service.
pub struct HttpVideoProvider {
    db: Database,
    client: Client,
}

impl HttpVideoProvider {
    pub fn new(db: Database, config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.provider.request_timeout_secs))
            .user_agent(USER_AGENT)
            .gzip(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { db, client })
    }

    /// Probe with retry on transient failures (throttling or transport)
    async fn probe_with_retry(&self, url: &Url) -> Result<StatusCode> {
        let mut last_error = None;
        let mut delay_ms = INITIAL_RETRY_DELAY_MS;

        for attempt in 0..MAX_RETRIES {
            match self.request_status(url).await {
                Ok(status) => {
                    // 429 and 503 are worth another try, anything else is final
                    if status != StatusCode::TOO_MANY_REQUESTS
                        && status != StatusCode::SERVICE_UNAVAILABLE
                    {
                        return Ok(status);
                    }
                    tracing::warn!("Received {} for {}, retrying after {}ms...", status, url, delay_ms);
                    last_error = Some(Error::Probe(format!("HTTP {} for {}", status, url)));
                }
                Err(e) => {
                    tracing::warn!("Probe failed for {} (attempt {}): {}", url, attempt + 1, e);
                    last_error = Some(e);
                }
            }

            if attempt < MAX_RETRIES - 1 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms *= 2; // Exponential backoff
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Probe(format!("probe failed for {}", url))))
    }

    /// HEAD the URL, falling back to GET where the host rejects HEAD
    async fn request_status(&self, url: &Url) -> Result<StatusCode> {
        let status = self.client.head(url.clone()).send().await?.status();

        if status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED {
            let status = self.client.get(url.clone()).send().await?.status();
            return Ok(status);
        }

        Ok(status)
    }
}

#[async_trait]
impl VideoProvider for HttpVideoProvider {
    async fn provider_url(&self, page_id: i64) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT provider_url FROM video_embeds WHERE page_id = ?")
                .bind(page_id)
                .fetch_optional(self.db.pool())
                .await?;

        Ok(row.map(|(url,)| url))
    }

    async fn is_available(&self, provider_url: &str) -> Result<bool> {
        let url = Url::parse(provider_url)?;
        let status = self.probe_with_retry(&url).await?;

        availability_from_status(status).ok_or_else(|| {
            Error::Probe(format!("unexpected HTTP {} from {}", status, provider_url))
        })
    }
}

/// Map a probe response status to an availability verdict.
/// `None` means the status is no evidence either way and must be treated
/// as a probe fault.
fn availability_from_status(status: StatusCode) -> Option<bool> {
    if status.is_success() {
        return Some(true);
    }

    match status {
        StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND
        | StatusCode::GONE => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_statuses_are_available() {
        assert_eq!(availability_from_status(StatusCode::OK), Some(true));
        assert_eq!(availability_from_status(StatusCode::NO_CONTENT), Some(true));
    }

    #[test]
    fn test_gone_statuses_are_unavailable() {
        assert_eq!(availability_from_status(StatusCode::NOT_FOUND), Some(false));
        assert_eq!(availability_from_status(StatusCode::GONE), Some(false));
        assert_eq!(availability_from_status(StatusCode::FORBIDDEN), Some(false));
        assert_eq!(
            availability_from_status(StatusCode::UNAUTHORIZED),
            Some(false)
        );
    }

    #[test]
    fn test_other_statuses_are_faults() {
        assert_eq!(
            availability_from_status(StatusCode::INTERNAL_SERVER_ERROR),
            None
        );
        assert_eq!(availability_from_status(StatusCode::BAD_GATEWAY), None);
        assert_eq!(availability_from_status(StatusCode::IM_A_TEAPOT), None);
    }

    #[tokio::test]
    async fn test_provider_url_reads_embed_row() {
        let db = Database::new_in_memory().await.unwrap();

        sqlx::query("INSERT INTO pages (id, namespace, title, is_redirect) VALUES (7, ?, 'Clip', 0)")
            .bind(crate::video::VIDEO_NAMESPACE)
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO video_embeds (page_id, provider_url) VALUES (7, 'https://videos.example/v/7')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let provider = HttpVideoProvider::new(db, &AppConfig::default()).unwrap();

        assert_eq!(
            provider.provider_url(7).await.unwrap().as_deref(),
            Some("https://videos.example/v/7")
        );
        assert_eq!(provider.provider_url(8).await.unwrap(), None);
    }
}
