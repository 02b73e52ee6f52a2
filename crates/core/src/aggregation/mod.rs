//! Inventory aggregation
//!
//! Groups records by sector and by (sector, code). Quantities are summed, so
//! duplicate rows for the same pair add up instead of overwriting each other,
//! and the result does not depend on record order.
//!
//! Records without a sector are dropped. Records with a blank code are
//! dropped too: a tile needs a code to be colored and labelled. Both counts
//! are reported in [`SkippedRecords`].

mod schema;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use sectorgrid_domain::{Record, Result, SectorCell, SectorSummary, SkuKey, SkuTile};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ports::TileColorizer;

pub use schema::validate_schema;

/// Rows that did not take part in aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkippedRecords {
    pub missing_sector: usize,
    pub missing_code: usize,
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryAggregate {
    pub sectors: BTreeMap<String, SectorSummary>,
    pub tiles: BTreeMap<SkuKey, SkuTile>,
    /// Sector ids in order of first appearance in the input records.
    pub order: Vec<String>,
    pub skipped: SkippedRecords,
}

impl InventoryAggregate {
    /// Tiles of one sector in code order.
    pub fn tiles_for_sector<'a>(&'a self, sector_id: &'a str) -> impl Iterator<Item = &'a SkuTile> {
        self.tiles
            .range(SkuKey::new(sector_id, "")..)
            .take_while(move |(key, _)| key.sector_id == sector_id)
            .map(|(_, tile)| tile)
    }

    /// Renderable cell content for a sector, `None` if the sector has no rows.
    pub fn sector_cell(&self, sector_id: &str) -> Option<SectorCell> {
        let summary = self.sectors.get(sector_id)?;
        Some(SectorCell {
            sector_id: summary.sector_id.clone(),
            total_quantity: summary.total_quantity,
            codes: summary.codes.clone(),
            tiles: self.tiles_for_sector(sector_id).cloned().collect(),
        })
    }

    pub fn tile(&self, sector_id: &str, code: &str) -> Option<&SkuTile> {
        self.tiles.get(&SkuKey::new(sector_id, code))
    }
}

/// Groups records into sector summaries and SKU tiles.
#[derive(Clone)]
pub struct Aggregator {
    colorizer: Arc<dyn TileColorizer>,
}

impl Aggregator {
    pub fn new(colorizer: Arc<dyn TileColorizer>) -> Self {
        Self { colorizer }
    }

    /// Aggregate a record set.
    ///
    /// Pure: running it twice over the same records, in any order, gives
    /// equal summaries and tiles. Only [`InventoryAggregate::order`] follows
    /// the input order.
    ///
    /// # Errors
    /// Propagates colorizer failures. With the default colorizer this cannot
    /// happen, since blank codes are filtered out first.
    pub fn aggregate(&self, records: &[Record]) -> Result<InventoryAggregate> {
        let mut skipped = SkippedRecords::default();
        let mut pair_totals: BTreeMap<SkuKey, u64> = BTreeMap::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut order = Vec::new();

        for record in records {
            let Some(sector_id) = record.sector_id() else {
                skipped.missing_sector += 1;
                continue;
            };
            if record.code.trim().is_empty() {
                skipped.missing_code += 1;
                continue;
            }

            if seen.insert(sector_id) {
                order.push(sector_id.to_string());
            }

            // Totals saturate at u64::MAX.
            let total = pair_totals.entry(SkuKey::new(sector_id, record.code.as_str())).or_default();
            *total = total.saturating_add(record.quantity);
        }

        if skipped.missing_sector > 0 {
            debug!(count = skipped.missing_sector, "dropped records without a sector");
        }
        if skipped.missing_code > 0 {
            warn!(count = skipped.missing_code, "dropped records with a blank code");
        }

        let mut tiles = BTreeMap::new();
        let mut sector_totals: BTreeMap<String, (u64, BTreeSet<String>)> = BTreeMap::new();

        for (key, quantity) in pair_totals {
            let color = self.colorizer.color_for(&key.code)?;

            let (total, codes) = sector_totals.entry(key.sector_id.clone()).or_default();
            *total = total.saturating_add(quantity);
            codes.insert(key.code.clone());

            let tile = SkuTile {
                sector_id: key.sector_id.clone(),
                code: key.code.clone(),
                quantity,
                color,
            };
            tiles.insert(key, tile);
        }

        let sectors = sector_totals
            .into_iter()
            .map(|(sector_id, (total_quantity, codes))| {
                let summary = SectorSummary {
                    sector_id: sector_id.clone(),
                    total_quantity,
                    codes: codes.into_iter().collect(),
                };
                (sector_id, summary)
            })
            .collect::<BTreeMap<_, _>>();

        debug!(sectors = sectors.len(), tiles = tiles.len(), "inventory aggregated");

        Ok(InventoryAggregate { sectors, tiles, order, skipped })
    }
}
