//! Domain types and models

pub mod grid;
pub mod inventory;
pub mod selection;

// Re-export for convenience
pub use grid::{
    CoordinateCollision, GridCell, GridCoordinate, GridLayout, GridModel, SectorCell,
    SectorParseError, SectorSummary, SkuTile, TileColor, UnmappedSector,
};
pub use inventory::{InventorySnapshot, Record, SkuKey};
pub use selection::{SelectionEvent, SelectionState};
