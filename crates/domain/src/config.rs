//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_FIXED_LAYOUT_COLUMNS, DEFAULT_MAX_COLUMN_NUMBER,
    DEFAULT_MAX_SESSIONS, DEFAULT_POOL_SIZE, DEFAULT_SESSION_IDLE_SECONDS,
    DEFAULT_SNAPSHOT_TTL_SECONDS, DEFAULT_TABLE_NAME, FIELD_CODE, FIELD_DESCRIPTION,
    FIELD_QUANTITY, FIELD_SECTOR,
};
use crate::impl_domain_status_conversions;
use crate::types::GridLayout;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Which relational backend holds the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

impl_domain_status_conversions!(DatabaseBackend {
    Sqlite => "sqlite",
    Postgres => "postgres",
});

/// Database configuration
///
/// `path` is used by the SQLite backend; `host`, `port`, `user`, `password`
/// and `dbname` by the PostgreSQL backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub dbname: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default)]
    pub columns: ColumnMapping,
}

/// Maps logical inventory fields onto physical column names.
///
/// Matching against the table is case-insensitive, so a table with a
/// `Sector` column satisfies the default mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_sector_column")]
    pub sector: String,
    #[serde(default = "default_code_column")]
    pub code: String,
    #[serde(default = "default_quantity_column")]
    pub quantity: String,
    #[serde(default = "default_description_column")]
    pub description: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            sector: default_sector_column(),
            code: default_code_column(),
            quantity: default_quantity_column(),
            description: default_description_column(),
        }
    }
}

impl ColumnMapping {
    /// Pairs of (logical field, physical column) in a fixed order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (FIELD_SECTOR, self.sector.as_str()),
            (FIELD_CODE, self.code.as_str()),
            (FIELD_QUANTITY, self.quantity.as_str()),
            (FIELD_DESCRIPTION, self.description.as_str()),
        ]
    }

    /// Resolve the logical field for a physical column name, if mapped.
    pub fn logical_field(&self, column: &str) -> Option<&'static str> {
        self.pairs()
            .into_iter()
            .find(|(_, physical)| physical.eq_ignore_ascii_case(column))
            .map(|(logical, _)| logical)
    }
}

/// Grid layout mode selector used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Cells follow a declared list of sector names.
    Fixed,
    /// Cells are positioned by parsing `<Letter><Number>` sector names.
    Parsed,
}

impl_domain_status_conversions!(LayoutMode {
    Fixed => "fixed",
    Parsed => "parsed",
});

/// Grid layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    /// Declared sector order for [`LayoutMode::Fixed`].
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Column count for [`LayoutMode::Fixed`].
    #[serde(default = "default_fixed_columns")]
    pub columns: usize,
    /// Largest column number accepted by [`LayoutMode::Parsed`].
    #[serde(default = "default_max_column")]
    pub max_column: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Parsed,
            sectors: Vec::new(),
            columns: default_fixed_columns(),
            max_column: default_max_column(),
        }
    }
}

impl LayoutConfig {
    /// Convert into the layout consumed by the grid builder.
    pub fn to_layout(&self) -> GridLayout {
        match self.mode {
            LayoutMode::Fixed => {
                GridLayout::Fixed { sectors: self.sectors.clone(), columns: self.columns.max(1) }
            }
            LayoutMode::Parsed => GridLayout::Parsed,
        }
    }
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub snapshot_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { snapshot_ttl_seconds: DEFAULT_SNAPSHOT_TTL_SECONDS }
    }
}

/// HTTP rendering adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Selection sessions unused for this long are dropped.
    #[serde(default = "default_session_idle_seconds")]
    pub session_idle_seconds: u64,
    /// Upper bound on live selection sessions.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            session_idle_seconds: default_session_idle_seconds(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                backend: DatabaseBackend::Sqlite,
                path: Some("inventory.db".to_string()),
                host: None,
                port: None,
                user: None,
                password: None,
                dbname: None,
                table: default_table(),
                pool_size: default_pool_size(),
                columns: ColumnMapping::default(),
            },
            layout: LayoutConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

fn default_table() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_fixed_columns() -> usize {
    DEFAULT_FIXED_LAYOUT_COLUMNS
}

fn default_max_column() -> u64 {
    DEFAULT_MAX_COLUMN_NUMBER
}

fn default_session_idle_seconds() -> u64 {
    DEFAULT_SESSION_IDLE_SECONDS
}

fn default_max_sessions() -> u64 {
    DEFAULT_MAX_SESSIONS
}

fn default_sector_column() -> String {
    FIELD_SECTOR.to_string()
}

fn default_code_column() -> String {
    FIELD_CODE.to_string()
}

fn default_quantity_column() -> String {
    FIELD_QUANTITY.to_string()
}

fn default_description_column() -> String {
    FIELD_DESCRIPTION.to_string()
}
