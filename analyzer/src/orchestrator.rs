use crate::cache::TopWordsCache;
use crate::error::{AnalyzerError, StoreError};
use crate::rank::rank;
use crate::stats::aggregate;
use crate::store::PostStore;
use crate::{NewPost, Post, PostId, RankedWord};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct RankingConfig {
    /// Upper bound on a single post-set fetch. `None` waits for the store.
    pub fetch_timeout: Option<Duration>,
    /// Extra wait on the write path after a successful recompute, before the
    /// write reports back. Zero disables it.
    pub write_delay: Duration,
}

/// Binds post mutations and word-list reads to the top-words cache.
///
/// Pipelines (fetch, aggregate, rank) run unlocked and may overlap; only the
/// publish into the cache is serialized, so the last `set` to complete wins.
/// Dropping any returned future cancels the fetch and publishes nothing.
pub struct TopWordsService {
    store: Arc<dyn PostStore>,
    cache: Arc<TopWordsCache>,
    config: RankingConfig,
}

impl TopWordsService {
    pub fn new(store: Arc<dyn PostStore>, cache: Arc<TopWordsCache>, config: RankingConfig) -> Self {
        Self { store, cache, config }
    }

    pub fn cache(&self) -> &Arc<TopWordsCache> { &self.cache }

    pub fn store(&self) -> &Arc<dyn PostStore> { &self.store }

    /// Serve the cached ranking, computing it inline on a cold cache.
    pub async fn top_words(&self) -> Result<Arc<[RankedWord]>, AnalyzerError> {
        if let Some(words) = self.cache.get() {
            tracing::debug!(cache = self.cache.name(), "cache hit");
            return Ok(words);
        }
        tracing::debug!(cache = self.cache.name(), "cache miss, recomputing");
        match self.recompute().await {
            Ok(words) => Ok(words),
            Err(e) => {
                // another pipeline may have published while this one was failing
                if let Some(words) = self.cache.get() {
                    tracing::warn!(error = %e, "recompute failed, serving cached ranking");
                    return Ok(words);
                }
                Err(e.into())
            }
        }
    }

    /// Hook for the write path after a post was created.
    pub async fn on_post_written(&self) -> Result<Arc<[RankedWord]>, AnalyzerError> {
        self.refresh_after_write(None).await
    }

    /// Hook for the write path after a post was deleted.
    pub async fn on_post_deleted(&self) -> Result<Arc<[RankedWord]>, AnalyzerError> {
        self.refresh_after_write(None).await
    }

    /// Create a post, then recompute the ranking before returning.
    pub async fn create_post(&self, post: NewPost) -> Result<Post, AnalyzerError> {
        let created = self.store.create_post(post).await?;
        tracing::info!(post_id = created.post_id, "post created");
        self.refresh_after_write(Some(created.post_id)).await?;
        Ok(created)
    }

    /// Delete a post, then recompute the ranking before returning.
    pub async fn delete_post(&self, post_id: PostId) -> Result<(), AnalyzerError> {
        self.store.delete_post(post_id).await?;
        tracing::info!(post_id, "post deleted");
        self.refresh_after_write(Some(post_id)).await?;
        Ok(())
    }

    async fn refresh_after_write(&self, post_id: Option<PostId>) -> Result<Arc<[RankedWord]>, AnalyzerError> {
        let words = self.recompute().await.map_err(|e| {
            tracing::warn!(?post_id, error = %e, "recompute skipped, ranking is stale");
            AnalyzerError::ComputationSkipped { post_id, reason: e.to_string() }
        })?;
        if !self.config.write_delay.is_zero() {
            tokio::time::sleep(self.config.write_delay).await;
        }
        Ok(words)
    }

    /// Fetch the full post set, rank it, and publish. Publishes nothing on fetch failure.
    async fn recompute(&self) -> Result<Arc<[RankedWord]>, StoreError> {
        let start = Instant::now();
        let posts = self.fetch_posts().await?;
        let counts = aggregate(&posts);
        let ranked = rank(&counts);
        tracing::info!(
            posts = posts.len(),
            unique_words = counts.len(),
            ranked = ranked.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "top words recomputed"
        );
        Ok(self.cache.set(ranked))
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, StoreError> {
        match self.config.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.store.list_posts())
                .await
                .map_err(|_| StoreError::Unavailable(format!("post fetch timed out after {}ms", limit.as_millis())))?,
            None => self.store.list_posts().await,
        }
    }
}
