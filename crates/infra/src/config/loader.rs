//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SECTORGRID_DB_BACKEND`: `sqlite` or `postgres` (required)
//! - `SECTORGRID_DB_PATH`: SQLite database file (required for sqlite)
//! - `SECTORGRID_DB_HOST`, `SECTORGRID_DB_PORT`, `SECTORGRID_DB_USER`,
//!   `SECTORGRID_DB_PASSWORD`, `SECTORGRID_DB_NAME`: PostgreSQL connection
//!   (host, user and name required for postgres)
//! - `SECTORGRID_DB_TABLE`: Inventory table name
//! - `SECTORGRID_DB_POOL_SIZE`: Connection pool size
//! - `SECTORGRID_COLUMN_SECTOR`, `SECTORGRID_COLUMN_CODE`,
//!   `SECTORGRID_COLUMN_QUANTITY`, `SECTORGRID_COLUMN_DESCRIPTION`: Physical
//!   column names
//! - `SECTORGRID_LAYOUT_MODE`: `fixed` or `parsed`
//! - `SECTORGRID_LAYOUT_SECTORS`: Comma-separated sector list (fixed mode)
//! - `SECTORGRID_LAYOUT_COLUMNS`: Grid width (fixed mode)
//! - `SECTORGRID_LAYOUT_MAX_COLUMN`: Largest accepted column number (parsed mode)
//! - `SECTORGRID_CACHE_TTL_SECONDS`: Snapshot cache TTL in seconds
//! - `SECTORGRID_BIND_ADDRESS`: HTTP listen address
//! - `SECTORGRID_SESSION_IDLE_SECONDS`: Idle lifetime of a selection session
//! - `SECTORGRID_MAX_SESSIONS`: Upper bound on live selection sessions
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./sectorgrid.json` or `./sectorgrid.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sectorgrid_domain::{
    CacheConfig, ColumnMapping, Config, DatabaseBackend, DatabaseConfig, LayoutConfig,
    LayoutMode, Result, SectorGridError, ServerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SectorGridError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SectorGridError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let backend = env_var("SECTORGRID_DB_BACKEND").and_then(|s| {
        DatabaseBackend::from_str(&s)
            .map_err(|e| SectorGridError::Config(format!("Invalid database backend: {e}")))
    })?;

    let mut columns = ColumnMapping::default();
    if let Some(name) = env_opt("SECTORGRID_COLUMN_SECTOR") {
        columns.sector = name;
    }
    if let Some(name) = env_opt("SECTORGRID_COLUMN_CODE") {
        columns.code = name;
    }
    if let Some(name) = env_opt("SECTORGRID_COLUMN_QUANTITY") {
        columns.quantity = name;
    }
    if let Some(name) = env_opt("SECTORGRID_COLUMN_DESCRIPTION") {
        columns.description = name;
    }

    let database = DatabaseConfig {
        backend,
        path: env_opt("SECTORGRID_DB_PATH"),
        host: env_opt("SECTORGRID_DB_HOST"),
        port: env_parse("SECTORGRID_DB_PORT", "port")?,
        user: env_opt("SECTORGRID_DB_USER"),
        password: env_opt("SECTORGRID_DB_PASSWORD"),
        dbname: env_opt("SECTORGRID_DB_NAME"),
        table: env_opt("SECTORGRID_DB_TABLE").unwrap_or(defaults.database.table),
        pool_size: env_parse("SECTORGRID_DB_POOL_SIZE", "pool size")?
            .unwrap_or(defaults.database.pool_size),
        columns,
    };

    let layout = LayoutConfig {
        mode: match env_opt("SECTORGRID_LAYOUT_MODE") {
            Some(mode) => LayoutMode::from_str(&mode)
                .map_err(|e| SectorGridError::Config(format!("Invalid layout mode: {e}")))?,
            None => defaults.layout.mode,
        },
        sectors: env_opt("SECTORGRID_LAYOUT_SECTORS")
            .map(|s| split_list(&s))
            .unwrap_or_default(),
        columns: env_parse("SECTORGRID_LAYOUT_COLUMNS", "layout columns")?
            .unwrap_or(defaults.layout.columns),
        max_column: env_parse("SECTORGRID_LAYOUT_MAX_COLUMN", "layout max column")?
            .unwrap_or(defaults.layout.max_column),
    };

    let config = Config {
        database,
        layout,
        cache: CacheConfig {
            snapshot_ttl_seconds: env_parse("SECTORGRID_CACHE_TTL_SECONDS", "cache TTL")?
                .unwrap_or(defaults.cache.snapshot_ttl_seconds),
        },
        server: ServerConfig {
            bind_address: env_opt("SECTORGRID_BIND_ADDRESS")
                .unwrap_or(defaults.server.bind_address),
            session_idle_seconds: env_parse("SECTORGRID_SESSION_IDLE_SECONDS", "session idle")?
                .unwrap_or(defaults.server.session_idle_seconds),
            max_sessions: env_parse("SECTORGRID_MAX_SESSIONS", "max sessions")?
                .unwrap_or(defaults.server.max_sessions),
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SectorGridError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SectorGridError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SectorGridError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SectorGridError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SectorGridError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SectorGridError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SectorGridError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Check the backend-specific connection fields.
///
/// # Errors
/// Returns `SectorGridError::Config` naming the first missing field.
pub fn validate(config: &Config) -> Result<()> {
    let db = &config.database;
    let required: &[(&str, bool)] = match db.backend {
        DatabaseBackend::Sqlite => &[("database.path", db.path.is_some())],
        DatabaseBackend::Postgres => &[
            ("database.host", db.host.is_some()),
            ("database.user", db.user.is_some()),
            ("database.dbname", db.dbname.is_some()),
        ],
    };

    if let Some((field, _)) = required.iter().find(|(_, present)| !present) {
        return Err(SectorGridError::Config(format!(
            "{field} is required for the {} backend",
            db.backend
        )));
    }

    if db.table.trim().is_empty() {
        return Err(SectorGridError::Config("database.table must not be empty".into()));
    }

    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./sectorgrid.{json,toml}`)
/// 2. Parent directory
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("sectorgrid.json"),
        dir.join("sectorgrid.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `SectorGridError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SectorGridError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Parse an optional environment variable.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|s| {
            s.trim()
                .parse::<T>()
                .map_err(|e| SectorGridError::Config(format!("Invalid {what}: {e}")))
        })
        .transpose()
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: &[&str] = &[
        "SECTORGRID_DB_BACKEND",
        "SECTORGRID_DB_PATH",
        "SECTORGRID_DB_HOST",
        "SECTORGRID_DB_PORT",
        "SECTORGRID_DB_USER",
        "SECTORGRID_DB_PASSWORD",
        "SECTORGRID_DB_NAME",
        "SECTORGRID_DB_TABLE",
        "SECTORGRID_DB_POOL_SIZE",
        "SECTORGRID_COLUMN_SECTOR",
        "SECTORGRID_COLUMN_CODE",
        "SECTORGRID_COLUMN_QUANTITY",
        "SECTORGRID_COLUMN_DESCRIPTION",
        "SECTORGRID_LAYOUT_MODE",
        "SECTORGRID_LAYOUT_SECTORS",
        "SECTORGRID_LAYOUT_COLUMNS",
        "SECTORGRID_LAYOUT_MAX_COLUMN",
        "SECTORGRID_CACHE_TTL_SECONDS",
        "SECTORGRID_BIND_ADDRESS",
        "SECTORGRID_SESSION_IDLE_SECONDS",
        "SECTORGRID_MAX_SESSIONS",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_sqlite() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SECTORGRID_DB_BACKEND", "sqlite");
        std::env::set_var("SECTORGRID_DB_PATH", "/tmp/inventory.db");
        std::env::set_var("SECTORGRID_DB_POOL_SIZE", "2");
        std::env::set_var("SECTORGRID_COLUMN_SECTOR", "Sector");
        std::env::set_var("SECTORGRID_LAYOUT_MODE", "fixed");
        std::env::set_var("SECTORGRID_LAYOUT_SECTORS", "A1, B2,,C3");
        std::env::set_var("SECTORGRID_CACHE_TTL_SECONDS", "60");
        std::env::set_var("SECTORGRID_LAYOUT_MAX_COLUMN", "250");
        std::env::set_var("SECTORGRID_SESSION_IDLE_SECONDS", "90");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
        assert_eq!(config.database.path.as_deref(), Some("/tmp/inventory.db"));
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.database.table, "inventory");
        assert_eq!(config.database.columns.sector, "Sector");
        assert_eq!(config.database.columns.code, "code");
        assert_eq!(config.layout.mode, LayoutMode::Fixed);
        assert_eq!(config.layout.sectors, vec!["A1", "B2", "C3"]);
        assert_eq!(config.layout.columns, 1);
        assert_eq!(config.cache.snapshot_ttl_seconds, 60);
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.layout.max_column, 250);
        assert_eq!(config.server.session_idle_seconds, 90);
        assert_eq!(config.server.max_sessions, 10_000);

        clear_env();
    }

    #[test]
    fn test_load_from_env_postgres_requires_host() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SECTORGRID_DB_BACKEND", "postgres");
        std::env::set_var("SECTORGRID_DB_USER", "reader");
        std::env::set_var("SECTORGRID_DB_NAME", "warehouse");

        let err = load_from_env().unwrap_err();
        match err {
            SectorGridError::Config(msg) => assert!(msg.contains("database.host")),
            other => panic!("expected config error, got {other:?}"),
        }

        std::env::set_var("SECTORGRID_DB_HOST", "db.internal");
        std::env::set_var("SECTORGRID_DB_PORT", "5433");
        let config = load_from_env().unwrap();
        assert_eq!(config.database.port, Some(5433));

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_backend() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result, Err(SectorGridError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SECTORGRID_DB_BACKEND", "sqlite");
        std::env::set_var("SECTORGRID_DB_PATH", "/tmp/inventory.db");
        std::env::set_var("SECTORGRID_DB_POOL_SIZE", "not-a-number");

        let result = load_from_env();
        assert!(matches!(result, Err(SectorGridError::Config(_))), "Should be a Config error");

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_backend() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SECTORGRID_DB_BACKEND", "oracle");
        assert!(matches!(load_from_env(), Err(SectorGridError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[database]
backend = "sqlite"
path = "stock.db"
table = "stock"

[database.columns]
sector = "Sector"
code = "codigo"
quantity = "cantidad"

[layout]
mode = "parsed"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.database.table, "stock");
        assert_eq!(config.database.columns.code, "codigo");
        assert_eq!(config.database.columns.description, "description");
        assert_eq!(config.layout.mode, LayoutMode::Parsed);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "database": { "backend": "sqlite", "path": "stock.db" },
                "layout": { "mode": "fixed", "sectors": ["A1", "A2"], "columns": 2 },
                "cache": { "snapshot_ttl_seconds": 10 }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.layout.sectors, vec!["A1", "A2"]);
        assert_eq!(config.layout.columns, 2);
        assert_eq!(config.cache.snapshot_ttl_seconds, 10);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_rejects_sqlite_without_path() {
        let path = write_temp(r#"{ "database": { "backend": "sqlite" } }"#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(matches!(result, Err(SectorGridError::Config(_))));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(SectorGridError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_parse_config_invalid_json() {
        let result = parse_config(r#"{ "database": "#, Path::new("test.json"));
        assert!(result.is_err(), "Should fail with invalid JSON");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list(" A1 ,, B2 "), vec!["A1", "B2"]);
        assert!(split_list("").is_empty());
    }
}
