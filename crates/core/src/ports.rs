//! Port interfaces for the grid pipeline.
//!
//! Adapters in `sectorgrid-infra` implement [`InventorySource`]; the default
//! [`TileColorizer`] lives in [`crate::color`].
//!
//! # Example
//!
//! ```no_run
//! use sectorgrid_core::InventorySource;
//!
//! async fn count_rows(source: &impl InventorySource) -> usize {
//!     source.load_snapshot().await.map(|s| s.records.len()).unwrap_or(0)
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use sectorgrid_domain::{InventorySnapshot, Result, TileColor};

/// Read-only access to the inventory table.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Read the whole table once.
    ///
    /// The snapshot's `columns` must list the logical fields the table
    /// exposes so the schema check can run before aggregation. Connectivity
    /// failures are returned as errors; implementations never substitute
    /// stale data.
    async fn load_snapshot(&self) -> Result<Arc<InventorySnapshot>>;

    /// Cheap connectivity test.
    async fn check_health(&self) -> Result<()>;
}

/// Assigns a display color to a SKU code.
///
/// Implementations must be pure: the same code always yields the same color.
pub trait TileColorizer: Send + Sync {
    /// # Errors
    /// Returns `SectorGridError::InvalidInput` for an empty code.
    fn color_for(&self, code: &str) -> Result<TileColor>;
}
