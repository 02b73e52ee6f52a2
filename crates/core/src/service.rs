//! Inventory grid service - load, validate, aggregate, lay out

use std::sync::Arc;

use sectorgrid_domain::{
    GridLayout, GridModel, InventorySnapshot, Record, Result, SelectionState,
};
use tracing::info;

use crate::aggregation::{validate_schema, Aggregator, InventoryAggregate};
use crate::color::Md5TileColorizer;
use crate::grid::GridBuilder;
use crate::ports::{InventorySource, TileColorizer};

/// Everything the rendering surface needs for one load.
#[derive(Debug, Clone)]
pub struct InventoryView {
    pub snapshot: Arc<InventorySnapshot>,
    pub aggregate: InventoryAggregate,
    pub grid: GridModel,
}

impl InventoryView {
    /// Records behind a selection, taken from this view's snapshot.
    pub fn detail(&self, selection: &SelectionState) -> Vec<&Record> {
        selection.detail(&self.snapshot.records)
    }
}

/// Runs the records -> aggregation -> grid pipeline over an inventory source.
pub struct InventoryGridService {
    source: Arc<dyn InventorySource>,
    aggregator: Aggregator,
    builder: GridBuilder,
    layout: GridLayout,
}

impl InventoryGridService {
    /// Create a service using the MD5 tile colorizer.
    pub fn new(source: Arc<dyn InventorySource>, layout: GridLayout) -> Self {
        Self::with_colorizer(source, Arc::new(Md5TileColorizer), layout)
    }

    /// Create a service with a custom colorizer
    pub fn with_colorizer(
        source: Arc<dyn InventorySource>,
        colorizer: Arc<dyn TileColorizer>,
        layout: GridLayout,
    ) -> Self {
        Self { source, aggregator: Aggregator::new(colorizer), builder: GridBuilder::new(), layout }
    }

    /// Replace the grid builder, e.g. to change the parsed column limit.
    #[must_use]
    pub fn with_grid_builder(mut self, builder: GridBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Load a snapshot and derive the aggregate and grid from it.
    ///
    /// # Errors
    /// Source failures and schema errors halt the pipeline; nothing is
    /// aggregated from a snapshot that lacks a required field.
    pub async fn load_view(&self) -> Result<InventoryView> {
        let snapshot = self.source.load_snapshot().await?;
        self.view_of(snapshot)
    }

    /// Derive a view from an already loaded snapshot.
    pub fn view_of(&self, snapshot: Arc<InventorySnapshot>) -> Result<InventoryView> {
        validate_schema(&snapshot.columns)?;

        let aggregate = self.aggregator.aggregate(&snapshot.records)?;
        let grid = self.builder.build(&aggregate, &self.layout)?;

        info!(
            records = snapshot.records.len(),
            sectors = aggregate.sectors.len(),
            tiles = aggregate.tiles.len(),
            unmapped = grid.unmapped.len(),
            "inventory view ready"
        );

        Ok(InventoryView { snapshot, aggregate, grid })
    }

    /// Connectivity check on the underlying source.
    pub async fn check_health(&self) -> Result<()> {
        self.source.check_health().await
    }
}
