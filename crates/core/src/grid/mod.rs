//! Grid model builder
//!
//! Turns an [`InventoryAggregate`] into a rectangular, sparse [`GridModel`].
//! Two layouts are supported:
//!
//! - [`GridLayout::Fixed`]: the declared sector list, row-major, a fixed
//!   number of columns wide. Listed sectors without data still get a cell.
//! - [`GridLayout::Parsed`]: positions come from the sector names themselves
//!   via [`parse_sector`]. Names that do not parse are reported in
//!   [`GridModel::unmapped`] instead of failing the build.

mod coordinates;

use sectorgrid_domain::constants::DEFAULT_MAX_COLUMN_NUMBER;
use sectorgrid_domain::{
    CoordinateCollision, GridCoordinate, GridLayout, GridModel, Result, SectorCell,
    UnmappedSector,
};
use tracing::{debug, warn};

use crate::aggregation::InventoryAggregate;

pub use coordinates::{parse_sector, parse_sector_within};

/// Builds grid models from aggregates.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder {
    max_column: u64,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self { max_column: DEFAULT_MAX_COLUMN_NUMBER }
    }
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest column number accepted in parsed mode (at least 1).
    #[must_use]
    pub fn with_max_column(mut self, max_column: u64) -> Self {
        self.max_column = max_column.max(1);
        self
    }

    pub fn max_column(&self) -> u64 {
        self.max_column
    }

    /// Build the grid for an aggregate.
    ///
    /// # Errors
    /// Only returns an error if a computed coordinate falls outside the
    /// computed extent, which indicates a bug rather than bad data.
    pub fn build(&self, aggregate: &InventoryAggregate, layout: &GridLayout) -> Result<GridModel> {
        let grid = match layout {
            GridLayout::Fixed { sectors, columns } => build_fixed(aggregate, sectors, *columns)?,
            GridLayout::Parsed => build_parsed(aggregate, self.max_column)?,
        };

        debug!(
            rows = grid.rows,
            cols = grid.cols,
            bound = grid.bound_cells().count(),
            unmapped = grid.unmapped.len(),
            collisions = grid.collisions.len(),
            "grid model built"
        );

        Ok(grid)
    }
}

// ============================================================================
// Fixed layout
// ============================================================================

fn build_fixed(
    aggregate: &InventoryAggregate,
    sectors: &[String],
    columns: usize,
) -> Result<GridModel> {
    if sectors.is_empty() {
        return Ok(GridModel::blank(0, 0));
    }

    let cols = columns.clamp(1, sectors.len());
    let rows = sectors.len().div_ceil(cols);
    let mut grid = GridModel::blank(rows, cols);

    for (index, sector_id) in sectors.iter().enumerate() {
        let cell = aggregate
            .sector_cell(sector_id)
            .unwrap_or_else(|| SectorCell::without_stock(sector_id.as_str()));
        let coordinate = GridCoordinate::new(index / cols, index % cols);
        record_collision(&mut grid, coordinate, cell)?;
    }

    let undeclared = aggregate
        .sectors
        .keys()
        .filter(|id| !sectors.iter().any(|s| s == *id))
        .count();
    if undeclared > 0 {
        debug!(count = undeclared, "sectors with data are not in the fixed layout");
    }

    Ok(grid)
}

// ============================================================================
// Parsed layout
// ============================================================================

fn build_parsed(aggregate: &InventoryAggregate, max_column: u64) -> Result<GridModel> {
    let mut placed: Vec<(GridCoordinate, SectorCell)> = Vec::with_capacity(aggregate.order.len());
    let mut unmapped = Vec::new();

    // Input order decides collisions: the sector that appears later wins.
    for sector_id in &aggregate.order {
        match parse_sector_within(sector_id, max_column) {
            Ok(coordinate) => {
                if let Some(cell) = aggregate.sector_cell(sector_id) {
                    placed.push((coordinate, cell));
                }
            }
            Err(reason) => {
                warn!(sector = %sector_id, reason = %reason, "sector left out of the grid");
                unmapped.push(UnmappedSector { sector_id: sector_id.clone(), reason });
            }
        }
    }

    let rows = placed.iter().map(|(c, _)| c.row + 1).max().unwrap_or(0);
    let cols = placed.iter().map(|(c, _)| c.col + 1).max().unwrap_or(0);

    let mut grid = GridModel::blank(rows, cols);
    grid.unmapped = unmapped;

    for (coordinate, cell) in placed {
        record_collision(&mut grid, coordinate, cell)?;
    }

    Ok(grid)
}

/// Place a cell, recording and logging any sector it displaces.
fn record_collision(grid: &mut GridModel, coordinate: GridCoordinate, cell: SectorCell) -> Result<()> {
    let winner = cell.sector_id.clone();
    if let Some(previous) = grid.place(coordinate, cell)? {
        warn!(
            coordinate = %coordinate,
            replaced = %previous.sector_id,
            winner = %winner,
            "sectors share a grid coordinate"
        );
        grid.collisions.push(CoordinateCollision {
            coordinate,
            replaced: previous.sector_id,
            winner,
        });
    }
    Ok(())
}
