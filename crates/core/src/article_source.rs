//! Synthetic article feed.
//!
//! [`ArticlePagingSource`] serves an unbounded, zero-based sequence of
//! [`Article`]s. Nothing is stored: each page is computed from the requested
//! key, the load size, and a reference time fixed at construction, so the
//! source holds no mutable state and can be shared freely across tasks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::article::Article;
use crate::config::ArticleSourceConfig;
use crate::delay::{LoadDelay, TokioDelay};
use crate::error::CoreError;
use crate::paging::{LoadParams, Page, PagingSource, PagingState};
use crate::types::{PagingKey, Timestamp};

/// Paging source producing numbered articles on demand.
#[derive(Clone)]
pub struct ArticlePagingSource {
    config: ArticleSourceConfig,
    first_article_created_time: Timestamp,
    delay: Arc<dyn LoadDelay>,
}

impl std::fmt::Debug for ArticlePagingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticlePagingSource")
            .field("config", &self.config)
            .field("first_article_created_time", &self.first_article_created_time)
            .finish_non_exhaustive()
    }
}

impl ArticlePagingSource {
    /// Source that waits on the tokio timer for non-initial loads.
    pub fn new(config: ArticleSourceConfig, first_article_created_time: Timestamp) -> Self {
        Self::with_delay(config, first_article_created_time, Arc::new(TokioDelay))
    }

    pub fn with_delay(
        config: ArticleSourceConfig,
        first_article_created_time: Timestamp,
        delay: Arc<dyn LoadDelay>,
    ) -> Self {
        Self {
            config,
            first_article_created_time,
            delay,
        }
    }

    pub fn config(&self) -> &ArticleSourceConfig {
        &self.config
    }

    pub fn first_article_created_time(&self) -> Timestamp {
        self.first_article_created_time
    }

    /// Refresh key for an anchor item the caller already resolved.
    ///
    /// Backs off half a page from the anchor so the reloaded page has
    /// context on both sides of it.
    pub fn refresh_key_for(&self, anchor: Option<&Article>, page_size: i64) -> Option<PagingKey> {
        let article = anchor?;
        Some(
            self.config
                .ensure_valid_key(article.id.saturating_sub(page_size / 2)),
        )
    }

    /// Compute the page starting at `start` without the simulated latency.
    fn build_page(&self, start: PagingKey, load_size: i64) -> Result<Page<Article>, CoreError> {
        let end = start.checked_add(load_size).ok_or(CoreError::KeyOverflow {
            key: start,
            load_size,
        })?;

        // Creation time is monotonic in id, so both ends in range means
        // every id in between is too.
        Article::synthesize(start, self.first_article_created_time)?;
        Article::synthesize(end - 1, self.first_article_created_time)?;

        let data = (start..end)
            .map(|id| Article::synthesize(id, self.first_article_created_time))
            .collect::<Result<Vec<_>, _>>()?;

        // Nothing precedes the starting key.
        let prev_key = if start == self.config.starting_key {
            None
        } else {
            Some(self.config.ensure_valid_key(start.saturating_sub(load_size)))
        };

        Ok(Page {
            data,
            prev_key,
            next_key: Some(end),
        })
    }
}

#[async_trait]
impl PagingSource for ArticlePagingSource {
    type Value = Article;

    async fn load(&self, params: LoadParams) -> Result<Page<Article>, CoreError> {
        if params.load_size <= 0 {
            return Err(CoreError::Validation(format!(
                "load_size must be positive, got {}",
                params.load_size
            )));
        }

        let start = self
            .config
            .ensure_valid_key(params.key.unwrap_or(self.config.starting_key));

        let page = self.build_page(start, params.load_size)?;

        if start != self.config.starting_key {
            tracing::debug!(
                key = start,
                delay = ?self.config.load_delay,
                "Simulating load latency",
            );
            self.delay.wait(self.config.load_delay).await;
        }

        tracing::debug!(
            key = start,
            load_size = params.load_size,
            load_type = ?params.load_type,
            prev_key = ?page.prev_key,
            next_key = ?page.next_key,
            "Loaded article page",
        );

        Ok(page)
    }

    fn get_refresh_key(&self, state: &PagingState<Article>) -> Option<PagingKey> {
        let anchor_position = state.anchor_position?;
        let article = state.closest_item_to_position(anchor_position);
        self.refresh_key_for(article, state.config.page_size)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;
    use crate::delay::NoDelay;

    fn source() -> ArticlePagingSource {
        ArticlePagingSource::with_delay(
            ArticleSourceConfig::default(),
            chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            Arc::new(NoDelay),
        )
    }

    #[test]
    fn first_page_has_no_prev_key() {
        let page = source().build_page(0, 20).unwrap();
        assert_eq!(page.prev_key, None);
        assert_eq!(page.next_key, Some(20));
        assert_eq!(page.len(), 20);
    }

    #[test]
    fn prev_key_steps_back_one_page() {
        let page = source().build_page(60, 20).unwrap();
        assert_eq!(page.prev_key, Some(40));
    }

    #[test]
    fn prev_key_is_clamped_to_starting_key() {
        let page = source().build_page(5, 20).unwrap();
        assert_eq!(page.prev_key, Some(0));
    }

    #[test]
    fn range_overflow_is_reported() {
        assert_matches!(
            source().build_page(i64::MAX - 1, 5),
            Err(CoreError::KeyOverflow { load_size: 5, .. })
        );
    }

    #[test]
    fn out_of_range_last_id_fails_before_allocating() {
        assert_matches!(
            source().build_page(0, 200_000_000),
            Err(CoreError::TimestampOutOfRange { id: 199_999_999 })
        );
    }

    #[tokio::test]
    async fn huge_load_size_returns_error() {
        assert_matches!(
            source().load(LoadParams::refresh(None, i64::MAX)).await,
            Err(CoreError::TimestampOutOfRange { id }) if id == i64::MAX - 1
        );
    }

    #[test]
    fn refresh_key_backs_off_half_a_page() {
        let s = source();
        let t = s.first_article_created_time();
        let article = Article::synthesize(50, t).unwrap();

        assert_eq!(s.refresh_key_for(Some(&article), 20), Some(40));
        assert_eq!(s.refresh_key_for(Some(&article), 15), Some(43));
    }

    #[test]
    fn refresh_key_never_drops_below_starting_key() {
        let s = source();
        let article = Article::synthesize(3, s.first_article_created_time()).unwrap();
        assert_eq!(s.refresh_key_for(Some(&article), 20), Some(0));
    }

    #[test]
    fn refresh_key_without_anchor_item_is_none() {
        assert_eq!(source().refresh_key_for(None, 20), None);
    }

    #[tokio::test]
    async fn non_positive_load_size_is_rejected() {
        let s = source();
        assert_matches!(
            s.load(LoadParams::refresh(None, 0)).await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            s.load(LoadParams::append(20, -3)).await,
            Err(CoreError::Validation(_))
        );
    }
}
