use async_trait::async_trait;
use sqlx::FromRow;

use super::Database;
use crate::video::{VideoPage, VIDEO_NAMESPACE};
use crate::Result;

/// Capabilities the sweep needs from page storage.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Number of non-redirect pages in the video namespace.
    async fn count_video_pages(&self) -> Result<u64>;

    /// A window of non-redirect video pages, ordered by ascending id.
    async fn select_video_pages(&self, offset: u64, limit: u32) -> Result<Vec<VideoPage>>;

    /// Delete every article embed of the video page, its embed record, and
    /// finally the page row itself. Returns how many article embeds went.
    async fn delete_page_and_embeds(&self, page_id: i64) -> Result<u64>;
}

/// Repository for page window reads and video-page removal
pub struct PageRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct PageRow {
    id: i64,
    title: String,
    is_redirect: i64,
}

impl From<PageRow> for VideoPage {
    fn from(row: PageRow) -> Self {
        VideoPage {
            id: row.id,
            title: row.title,
            is_redirect: row.is_redirect != 0,
        }
    }
}

impl<'a> PageRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PageStore for PageRepository<'_> {
    async fn count_video_pages(&self) -> Result<u64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM pages WHERE namespace = ? AND is_redirect = 0",
        )
        .bind(VIDEO_NAMESPACE)
        .fetch_one(self.db.pool())
        .await?;

        Ok(count.0 as u64)
    }

    async fn select_video_pages(&self, offset: u64, limit: u32) -> Result<Vec<VideoPage>> {
        let rows: Vec<PageRow> = sqlx::query_as(
            r#"
            SELECT id, title, is_redirect
            FROM pages
            WHERE namespace = ? AND is_redirect = 0
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(VIDEO_NAMESPACE)
        .bind(limit)
        .bind(offset as i64)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(VideoPage::from).collect())
    }

    async fn delete_page_and_embeds(&self, page_id: i64) -> Result<u64> {
        let mut tx = self.db.pool().begin().await?;

        let embeds = sqlx::query("DELETE FROM article_embeds WHERE video_page_id = ?")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM video_embeds WHERE page_id = ?")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(page_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(embeds.rows_affected())
    }
}
