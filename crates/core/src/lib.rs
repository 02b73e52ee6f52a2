//! # SectorGrid Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the inventory data source and tile colors
//! - The aggregation pipeline: schema check, grouping, grid layout
//! - Selection and detail lookup
//!
//! ## Architecture Principles
//! - Only depends on `sectorgrid-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod aggregation;
pub mod color;
pub mod grid;
pub mod ports;
pub mod selection;
pub mod service;

// Re-export specific items to avoid ambiguity
pub use aggregation::{validate_schema, Aggregator, InventoryAggregate, SkippedRecords};
pub use color::{color_for, Md5TileColorizer};
pub use grid::{parse_sector, parse_sector_within, GridBuilder};
pub use ports::{InventorySource, TileColorizer};
pub use selection::{detail_for, records_for};
pub use service::{InventoryGridService, InventoryView};
