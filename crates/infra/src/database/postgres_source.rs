//! PostgreSQL-backed implementation of the `InventorySource` port.
//!
//! Column presence comes from `information_schema.columns` in the current
//! schema. Every selected column is cast to text so the shared row logic can
//! handle integer, numeric and text quantity columns alike.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sectorgrid_core::InventorySource;
use sectorgrid_domain::{
    ColumnMapping, DatabaseConfig, InventorySnapshot, Result, SectorGridError,
};
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error, info, warn};

use super::rows::{RawRow, ResolvedColumns};
use crate::errors::InfraError;

const DEFAULT_PORT: u16 = 5432;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const COLUMNS_QUERY: &str = "SELECT column_name::text FROM information_schema.columns
    WHERE table_schema = current_schema() AND table_name = $1
    ORDER BY ordinal_position";

/// State of the held client as seen before a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    Open,
    Closed,
    Missing,
}

impl ConnectionState {
    fn of(client: Option<&Client>) -> Self {
        match client {
            Some(client) if client.is_closed() => Self::Closed,
            Some(_) => Self::Open,
            None => Self::Missing,
        }
    }

    fn needs_reconnect(self) -> bool {
        self != Self::Open
    }
}

/// Inventory source reading one PostgreSQL table.
///
/// A client whose connection has dropped is replaced on the next call when
/// the source knows its connection settings.
pub struct PostgresInventorySource {
    settings: Option<tokio_postgres::Config>,
    client: RwLock<Option<Arc<Client>>>,
    table: String,
    mapping: ColumnMapping,
}

impl PostgresInventorySource {
    /// Connect using the database section of the configuration.
    ///
    /// # Errors
    /// Returns `SectorGridError::Config` when a connection field is missing
    /// and the mapped driver error when the connection fails.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let source = Self::connect_lazy(config)?;
        source.client().await?;
        Ok(source)
    }

    /// Build the source without opening a connection; the first call
    /// connects.
    ///
    /// # Errors
    /// Returns `SectorGridError::Config` when a connection field is missing.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        Ok(Self {
            settings: Some(pg_settings(config)?),
            client: RwLock::new(None),
            table: config.table.clone(),
            mapping: config.columns.clone(),
        })
    }

    /// Wrap an already connected client. Without settings it cannot be
    /// replaced once its connection closes.
    pub fn from_client(client: Client, table: impl Into<String>, mapping: ColumnMapping) -> Self {
        Self {
            settings: None,
            client: RwLock::new(Some(Arc::new(client))),
            table: table.into(),
            mapping,
        }
    }

    /// Current client, reconnecting when it is missing or closed.
    async fn client(&self) -> Result<Arc<Client>> {
        {
            let held = self.client.read().await;
            if let Some(client) = held.as_ref().filter(|c| !c.is_closed()) {
                return Ok(Arc::clone(client));
            }
        }

        let mut held = self.client.write().await;
        let state = ConnectionState::of(held.as_deref());
        if !state.needs_reconnect() {
            if let Some(client) = held.as_ref() {
                return Ok(Arc::clone(client));
            }
        }

        let Some(settings) = &self.settings else {
            return Err(SectorGridError::Database("postgres connection closed".into()));
        };
        if state == ConnectionState::Closed {
            warn!(table = %self.table, "postgres connection lost, reconnecting");
        }

        let client = Arc::new(open(settings).await?);
        *held = Some(Arc::clone(&client));
        Ok(client)
    }

    async fn table_columns(&self, client: &Client) -> Result<Vec<String>> {
        let rows = client.query(COLUMNS_QUERY, &[&self.table]).await.map_err(map_pg_error)?;
        let names = rows
            .iter()
            .map(|row| row.try_get::<_, String>(0))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(map_pg_error)?;

        if names.is_empty() {
            return Err(SectorGridError::NotFound(format!("table '{}' does not exist", self.table)));
        }

        debug!(table = %self.table, columns = ?names, "postgres table metadata read");
        Ok(names)
    }
}

/// Driver settings from the database configuration.
fn pg_settings(config: &DatabaseConfig) -> Result<tokio_postgres::Config> {
    let required = |value: &Option<String>, field: &str| {
        value.clone().ok_or_else(|| {
            SectorGridError::Config(format!("database.{field} is required for postgres"))
        })
    };

    let host = required(&config.host, "host")?;
    let user = required(&config.user, "user")?;
    let dbname = required(&config.dbname, "dbname")?;

    let mut settings = tokio_postgres::Config::new();
    settings
        .host(&host)
        .port(config.port.unwrap_or(DEFAULT_PORT))
        .user(&user)
        .dbname(&dbname)
        .connect_timeout(CONNECT_TIMEOUT);
    if let Some(password) = &config.password {
        settings.password(password);
    }
    Ok(settings)
}

/// Open a connection; its driver runs on a spawned task until it closes.
async fn open(settings: &tokio_postgres::Config) -> Result<Client> {
    let (client, connection) = settings.connect(NoTls).await.map_err(map_pg_error)?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(error = %err, "postgres connection terminated");
        }
    });

    info!(
        port = ?settings.get_ports().first(),
        dbname = ?settings.get_dbname(),
        "postgres connection established"
    );
    Ok(client)
}

#[async_trait]
impl InventorySource for PostgresInventorySource {
    async fn load_snapshot(&self) -> Result<Arc<InventorySnapshot>> {
        let client = self.client().await?;
        let physical = self.table_columns(&client).await?;
        let columns = ResolvedColumns::resolve(&physical, &self.mapping)?;

        let rows = client
            .query(&columns.select_sql(&self.table, "::text"), &[])
            .await
            .map_err(map_pg_error)?;

        let records = rows
            .iter()
            .map(|row| {
                let raw = RawRow {
                    sector: row.try_get(0).map_err(map_pg_error)?,
                    code: row.try_get(1).map_err(map_pg_error)?,
                    quantity: row.try_get(2).map_err(map_pg_error)?,
                    description: row.try_get(3).map_err(map_pg_error)?,
                };
                raw.into_record()
            })
            .collect::<Result<Vec<_>>>()?;

        info!(table = %self.table, rows = records.len(), "inventory snapshot loaded from postgres");
        Ok(Arc::new(InventorySnapshot::new(columns.logical, records)))
    }

    async fn check_health(&self) -> Result<()> {
        self.client().await?.batch_execute("SELECT 1").await.map_err(map_pg_error)
    }
}

fn map_pg_error(err: tokio_postgres::Error) -> SectorGridError {
    SectorGridError::from(InfraError::from(err))
}
