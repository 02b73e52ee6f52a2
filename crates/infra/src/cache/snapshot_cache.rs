//! Inventory snapshot caching with moka
//!
//! Wraps any [`InventorySource`] and keeps the last successful snapshot for a
//! configurable TTL, so page renders inside the window share one table read.
//!
//! # Architecture
//!
//! - **Single entry**: the whole table is one snapshot, keyed by `()`
//! - **Coalescing**: concurrent misses trigger one load; the others wait
//! - **Error Handling**: failed loads are never cached, and an expired
//!   snapshot is never served in place of a failed load
//! - **TTL**: configurable time-to-live with default 5 minutes
//!
//! # Example
//!
//! ```rust,ignore
//! use sectorgrid_infra::cache::{CachedInventorySource, SnapshotCacheConfig};
//!
//! let cached = CachedInventorySource::new(source, SnapshotCacheConfig::default());
//! let snapshot = cached.load_snapshot().await?;
//! cached.invalidate().await; // next load reads the table again
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use sectorgrid_core::InventorySource;
use sectorgrid_domain::constants::DEFAULT_SNAPSHOT_TTL_SECONDS;
use sectorgrid_domain::{CacheConfig, InventorySnapshot, Result};

/// Snapshot cache configuration
#[derive(Debug, Clone)]
pub struct SnapshotCacheConfig {
    /// Time-to-live of a cached snapshot
    pub ttl: Duration,
}

impl Default for SnapshotCacheConfig {
    fn default() -> Self {
        Self { ttl: Duration::from_secs(DEFAULT_SNAPSHOT_TTL_SECONDS) }
    }
}

impl From<&CacheConfig> for SnapshotCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self::with_ttl(Duration::from_secs(config.snapshot_ttl_seconds))
    }
}

impl SnapshotCacheConfig {
    /// Create config with custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(ttl_seconds = self.ttl.as_secs(), "Snapshot cache configuration loaded");
    }
}

/// Inventory source decorator holding the last snapshot for a TTL window.
pub struct CachedInventorySource {
    inner: Arc<dyn InventorySource>,
    cache: Cache<(), Arc<InventorySnapshot>>,
}

impl CachedInventorySource {
    /// Wrap `inner` with a snapshot cache.
    pub fn new(inner: Arc<dyn InventorySource>, config: SnapshotCacheConfig) -> Self {
        config.log_config();
        let cache = Cache::builder().time_to_live(config.ttl).max_capacity(1).build();
        Self { inner, cache }
    }

    /// Drop the cached snapshot so the next load reads the source.
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
        tracing::info!("Snapshot cache invalidated");
    }

    /// Whether a snapshot is currently cached.
    pub async fn is_cached(&self) -> bool {
        self.cache.get(&()).await.is_some()
    }
}

#[async_trait]
impl InventorySource for CachedInventorySource {
    async fn load_snapshot(&self) -> Result<Arc<InventorySnapshot>> {
        if let Some(snapshot) = self.cache.get(&()).await {
            tracing::debug!(loaded_at = %snapshot.loaded_at, "Snapshot cache hit");
            return Ok(snapshot);
        }

        tracing::debug!("Snapshot cache miss, loading from source");
        let inner = Arc::clone(&self.inner);
        self.cache.try_get_with((), async move { inner.load_snapshot().await }).await.map_err(
            |err| {
                tracing::warn!(error = %err, "Snapshot load failed");
                (*err).clone()
            },
        )
    }

    async fn check_health(&self) -> Result<()> {
        self.inner.check_health().await
    }
}
