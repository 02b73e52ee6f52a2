//! # SectorGrid Domain
//!
//! Business domain types and models for SectorGrid.
//!
//! This crate contains:
//! - Inventory records and snapshots
//! - Aggregated sector summaries, SKU tiles and the grid model
//! - Selection state and its transitions
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other SectorGrid crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
