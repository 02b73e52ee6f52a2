//! Inventory rows as they come out of the data source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// One inventory row.
///
/// Records are immutable once loaded; every derived structure (summaries,
/// tiles, grid) is recomputed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Record {
    /// Storage location; rows without one are left out of the grid.
    pub sector: Option<String>,
    /// SKU code.
    pub code: String,
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record {
    /// Create a record bound to a sector.
    pub fn new(sector: impl Into<String>, code: impl Into<String>, quantity: u64) -> Self {
        Self { sector: Some(sector.into()), code: code.into(), quantity, description: None }
    }

    /// Create a record whose sector is missing.
    pub fn unsectored(code: impl Into<String>, quantity: u64) -> Self {
        Self { sector: None, code: code.into(), quantity, description: None }
    }

    /// Attach a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sector id usable for grouping: present and not blank.
    ///
    /// The value is returned as stored, so `"A1 "` and `"A1"` are different
    /// sectors.
    pub fn sector_id(&self) -> Option<&str> {
        self.sector.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Whether this record belongs to the given (sector, code) pair.
    pub fn matches(&self, sector: &str, code: &str) -> bool {
        self.sector_id() == Some(sector) && self.code == code
    }
}

/// Grouping key for SKU tiles: one (sector, code) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkuKey {
    pub sector_id: String,
    pub code: String,
}

impl SkuKey {
    pub fn new(sector_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self { sector_id: sector_id.into(), code: code.into() }
    }
}

/// Immutable result of one full-table read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Logical field names the source reported (see
    /// [`crate::constants::REQUIRED_FIELDS`]).
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    pub loaded_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Snapshot stamped with the current time.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records, loaded_at: Utc::now() }
    }

    /// Whether the source exposed the given logical field.
    pub fn has_column(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(field))
    }
}
