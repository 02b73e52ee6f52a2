//! Database implementations

pub mod manager;
pub mod postgres_source;
mod rows;
pub mod sqlite_source;

use std::sync::Arc;

use sectorgrid_core::InventorySource;
use sectorgrid_domain::{DatabaseBackend, DatabaseConfig, Result, SectorGridError};

pub use manager::{DbManager, SqliteConnection};
pub use postgres_source::PostgresInventorySource;
pub use sqlite_source::SqliteInventorySource;

/// Build the inventory source selected by `config.backend`.
///
/// # Errors
/// Returns `SectorGridError::Config` when the backend's connection fields
/// are missing, or the connection error from the driver.
pub async fn connect_source(config: &DatabaseConfig) -> Result<Arc<dyn InventorySource>> {
    match config.backend {
        DatabaseBackend::Sqlite => {
            let path = config.path.as_deref().ok_or_else(|| {
                SectorGridError::Config("database.path is required for sqlite".into())
            })?;
            let db = Arc::new(DbManager::new(path, config.pool_size)?);
            Ok(Arc::new(SqliteInventorySource::new(db, &config.table, config.columns.clone())))
        }
        DatabaseBackend::Postgres => Ok(Arc::new(PostgresInventorySource::connect(config).await?)),
    }
}
