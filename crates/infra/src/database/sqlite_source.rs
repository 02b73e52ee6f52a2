//! SQLite-backed implementation of the `InventorySource` port.
//!
//! Column presence is read with `PRAGMA table_info` before any row is
//! selected. SQLite columns are dynamically typed, so every value is
//! stringified first and converted by the shared row logic. All operations
//! use spawn_blocking to avoid blocking the async runtime.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::Row;
use sectorgrid_core::InventorySource;
use sectorgrid_domain::{ColumnMapping, InventorySnapshot, Result, SectorGridError};
use tokio::task;
use tracing::{debug, info};

use super::manager::{map_sql_error, DbManager, SqliteConnection};
use super::rows::{RawRow, ResolvedColumns};
use crate::errors::InfraError;

/// Inventory source reading one SQLite table.
pub struct SqliteInventorySource {
    db: Arc<DbManager>,
    table: String,
    mapping: ColumnMapping,
}

impl SqliteInventorySource {
    /// Construct a source backed by the shared database manager.
    pub fn new(db: Arc<DbManager>, table: impl Into<String>, mapping: ColumnMapping) -> Self {
        Self { db, table: table.into(), mapping }
    }
}

#[async_trait]
impl InventorySource for SqliteInventorySource {
    async fn load_snapshot(&self) -> Result<Arc<InventorySnapshot>> {
        let db = Arc::clone(&self.db);
        let table = self.table.clone();
        let mapping = self.mapping.clone();

        task::spawn_blocking(move || -> Result<Arc<InventorySnapshot>> {
            let conn = db.get_connection()?;

            let physical = table_columns(&conn, &table)?;
            let columns = ResolvedColumns::resolve(&physical, &mapping)?;

            let mut stmt = conn.prepare(&columns.select_sql(&table, "")).map_err(map_sql_error)?;
            let raw_rows = stmt
                .query_map([], read_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            let records =
                raw_rows.into_iter().map(RawRow::into_record).collect::<Result<Vec<_>>>()?;

            info!(table = %table, rows = records.len(), "inventory snapshot loaded from sqlite");
            Ok(Arc::new(InventorySnapshot::new(columns.logical, records)))
        })
        .await
        .map_err(map_join_error)?
    }

    async fn check_health(&self) -> Result<()> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || db.health_check()).await.map_err(map_join_error)?
    }
}

/// Column names of `table`, in declaration order.
fn table_columns(conn: &SqliteConnection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .map_err(map_sql_error)?;
    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;

    if names.is_empty() {
        return Err(SectorGridError::NotFound(format!("table '{table}' does not exist")));
    }

    debug!(table = %table, columns = ?names, "sqlite table metadata read");
    Ok(names)
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        sector: value_to_text(row.get_ref(0)?),
        code: value_to_text(row.get_ref(1)?),
        quantity: value_to_text(row.get_ref(2)?),
        description: value_to_text(row.get_ref(3)?),
    })
}

/// Stringify a dynamically typed SQLite value; NULL stays `None`.
fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

fn map_join_error(err: task::JoinError) -> SectorGridError {
    SectorGridError::from(InfraError::from(err))
}
