//! Aggregated inventory and the grid model handed to the rendering surface.
//!
//! Everything here is derived: summaries and tiles come from the aggregator,
//! cells and the grid from the grid builder. The types are plain data so the
//! rendering surface can serialize them as-is.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{Result, SectorGridError};

/* -------------------------------------------------------------------------- */
/* Aggregates */
/* -------------------------------------------------------------------------- */

/// Display color of a tile, always `#` followed by six lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(transparent)]
pub struct TileColor(String);

impl TileColor {
    /// Build a color from six hex digits, with or without the leading `#`.
    ///
    /// # Errors
    /// Returns `SectorGridError::InvalidInput` unless the input is exactly six
    /// ASCII hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SectorGridError::InvalidInput(format!("not an RGB hex color: {hex}")));
        }
        Ok(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-sector totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct SectorSummary {
    pub sector_id: String,
    /// Sum of every record quantity in the sector.
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_quantity: u64,
    /// Distinct codes, sorted lexicographically.
    pub codes: Vec<String>,
}

impl SectorSummary {
    /// Summary for a sector with no stock.
    pub fn empty(sector_id: impl Into<String>) -> Self {
        Self { sector_id: sector_id.into(), total_quantity: 0, codes: Vec::new() }
    }
}

/// Quantity of one SKU within one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct SkuTile {
    pub sector_id: String,
    pub code: String,
    /// Sum over every record of this (sector, code) pair.
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub quantity: u64,
    pub color: TileColor,
}

/* -------------------------------------------------------------------------- */
/* Coordinates */
/* -------------------------------------------------------------------------- */

/// Zero-based grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Why a sector name could not be turned into a grid coordinate.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectorParseError {
    #[error("sector name is empty")]
    Empty,

    #[error("sector name must start with a letter, found '{found}'")]
    InvalidRow { found: char },

    #[error("sector name has no column number")]
    MissingColumn,

    #[error("column suffix '{suffix}' is not a number")]
    InvalidColumn { suffix: String },

    #[error("column number {value} is out of range")]
    ColumnOutOfRange {
        #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
        value: u64,
    },
}

/// A sector left out of a parsed grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct UnmappedSector {
    pub sector_id: String,
    pub reason: SectorParseError,
}

/// Two sectors that resolved to the same coordinate.
///
/// The later sector replaces the earlier one in the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CoordinateCollision {
    pub coordinate: GridCoordinate,
    pub replaced: String,
    pub winner: String,
}

/* -------------------------------------------------------------------------- */
/* Grid model */
/* -------------------------------------------------------------------------- */

/// How cells are positioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GridLayout {
    /// Declared sector list, laid out row-major `columns` wide.
    Fixed { sectors: Vec<String>, columns: usize },
    /// Positions parsed from `<Letter><Number>` sector names.
    Parsed,
}

/// Content of a cell bound to a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct SectorCell {
    pub sector_id: String,
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_quantity: u64,
    pub codes: Vec<String>,
    /// Tiles in `codes` order.
    pub tiles: Vec<SkuTile>,
}

impl SectorCell {
    /// Cell for a declared sector that has no rows in the data.
    pub fn without_stock(sector_id: impl Into<String>) -> Self {
        Self { sector_id: sector_id.into(), total_quantity: 0, codes: Vec::new(), tiles: Vec::new() }
    }

    /// Label shown on the sector box.
    pub fn label(&self) -> &str {
        &self.sector_id
    }
}

/// One grid position. `sector == None` renders blank, which is different
/// from a sector that is present with zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub sector: Option<SectorCell>,
}

impl GridCell {
    pub fn is_empty(&self) -> bool {
        self.sector.is_none()
    }

    pub fn coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(self.row, self.col)
    }
}

/// Rectangular, possibly sparse grid of cells (row-major).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct GridModel {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<GridCell>>,
    #[serde(default)]
    pub unmapped: Vec<UnmappedSector>,
    #[serde(default)]
    pub collisions: Vec<CoordinateCollision>,
}

impl GridModel {
    /// Grid of the given extent with every cell blank.
    pub fn blank(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .map(|row| (0..cols).map(|col| GridCell { row, col, sector: None }).collect())
            .collect();
        Self { rows, cols, cells, unmapped: Vec::new(), collisions: Vec::new() }
    }

    /// Cell at a position, `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Bind a sector to a position, returning whatever sector was there.
    ///
    /// # Errors
    /// Returns `SectorGridError::Internal` if the coordinate lies outside the
    /// grid extent.
    pub fn place(
        &mut self,
        coordinate: GridCoordinate,
        sector: SectorCell,
    ) -> Result<Option<SectorCell>> {
        let cell = self
            .cells
            .get_mut(coordinate.row)
            .and_then(|r| r.get_mut(coordinate.col))
            .ok_or_else(|| {
                SectorGridError::Internal(format!(
                    "coordinate {coordinate} outside {}x{} grid",
                    self.rows, self.cols
                ))
            })?;
        Ok(cell.sector.replace(sector))
    }

    /// Cells bound to a sector, row-major.
    pub fn bound_cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.cells.iter().flatten().filter(|c| !c.is_empty())
    }

    /// Find the cell holding a sector.
    pub fn find_sector(&self, sector_id: &str) -> Option<&GridCell> {
        self.bound_cells()
            .find(|c| c.sector.as_ref().is_some_and(|s| s.sector_id == sector_id))
    }
}
