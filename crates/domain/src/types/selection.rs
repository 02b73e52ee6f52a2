//! Click-to-detail selection.
//!
//! The selection is a value owned by the caller (one per session). It only
//! echoes the last click and never touches the records it points at.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::inventory::Record;

/// Interaction events coming back from the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    TileClicked { sector: String, code: String },
    CloseClicked,
}

/// Currently selected tile, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected { sector: String, code: String },
}

impl SelectionState {
    /// State after clicking a tile.
    pub fn select(sector: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Selected { sector: sector.into(), code: code.into() }
    }

    /// State after closing the detail view.
    pub fn clear() -> Self {
        Self::Unselected
    }

    /// Apply an interaction event.
    ///
    /// A click always replaces the current selection; close always clears it.
    #[must_use]
    pub fn apply(self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::TileClicked { sector, code } => Self::select(sector, code),
            SelectionEvent::CloseClicked => Self::clear(),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }

    /// The selected (sector, code) pair.
    pub fn target(&self) -> Option<(&str, &str)> {
        match self {
            Self::Selected { sector, code } => Some((sector.as_str(), code.as_str())),
            Self::Unselected => None,
        }
    }

    /// Records behind the current selection, in input order.
    ///
    /// Empty when nothing is selected or when the selected pair has no rows.
    pub fn detail<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        match self.target() {
            Some((sector, code)) => records.iter().filter(|r| r.matches(sector, code)).collect(),
            None => Vec::new(),
        }
    }
}
