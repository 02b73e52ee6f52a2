//! Application context - dependency injection container

mod sessions;

use std::sync::Arc;

use sectorgrid_core::{GridBuilder, InventoryGridService, InventorySource};
use sectorgrid_domain::{Config, Result};
use sectorgrid_infra::cache::{CachedInventorySource, SnapshotCacheConfig};
use sectorgrid_infra::{config, connect_source};
use tracing::info;

pub use sessions::SessionStore;

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    /// Snapshot cache in front of the configured inventory source.
    pub source: Arc<CachedInventorySource>,
    pub grid_service: Arc<InventoryGridService>,
    pub sessions: Arc<SessionStore>,
}

impl AppContext {
    /// Load configuration and connect to the configured database.
    ///
    /// # Errors
    /// Returns configuration errors and connection failures.
    pub async fn new() -> Result<Self> {
        let config = config::load()?;
        Self::new_with_config(config).await
    }

    /// Connect to the database described by `config`.
    ///
    /// # Errors
    /// Returns connection failures from the selected backend.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        let source = connect_source(&config.database).await?;
        info!(backend = %config.database.backend, table = %config.database.table, "inventory source connected");
        Ok(Self::with_source(config, source))
    }

    /// Build the context around an existing source.
    pub fn with_source(config: Config, source: Arc<dyn InventorySource>) -> Self {
        let cached =
            Arc::new(CachedInventorySource::new(source, SnapshotCacheConfig::from(&config.cache)));
        let builder = GridBuilder::new().with_max_column(config.layout.max_column);
        let grid_service = Arc::new(
            InventoryGridService::new(cached.clone(), config.layout.to_layout())
                .with_grid_builder(builder),
        );
        let sessions = Arc::new(SessionStore::from_config(&config.server));

        Self { config, source: cached, grid_service, sessions }
    }

    /// Perform a health check of the context components
    pub async fn health_check(&self) -> HealthStatus {
        let source = match self.grid_service.check_health().await {
            Ok(()) => ComponentHealth::healthy("inventory_source"),
            Err(err) => ComponentHealth::unhealthy("inventory_source", err.to_string()),
        };

        let cache = if self.source.is_cached().await {
            ComponentHealth::healthy_with("snapshot_cache", "warm")
        } else {
            ComponentHealth::healthy_with("snapshot_cache", "cold")
        };

        let sessions =
            ComponentHealth::healthy_with("sessions", format!("{} active", self.sessions.len()));

        let mut status =
            HealthStatus::new().add_component(source).add_component(cache).add_component(sessions);
        status.calculate_score();
        status
    }
}
