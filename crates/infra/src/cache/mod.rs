//! Caching layers for inventory sources.

pub mod snapshot_cache;

pub use snapshot_cache::{CachedInventorySource, SnapshotCacheConfig};
