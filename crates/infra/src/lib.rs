//! # SectorGrid Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Inventory sources (SQLite through an r2d2 pool, PostgreSQL)
//! - The TTL snapshot cache wrapped around any source
//! - Configuration loading from environment variables and files
//! - Conversions from driver errors into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `sectorgrid-core`
//! - Depends on `sectorgrid-domain` and `sectorgrid-core`
//! - Contains all "impure" code (I/O, database drivers)

pub mod cache;
pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use cache::{CachedInventorySource, SnapshotCacheConfig};
pub use database::{connect_source, DbManager, PostgresInventorySource, SqliteInventorySource};
pub use errors::InfraError;
