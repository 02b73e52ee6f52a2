//! Selection transitions and detail lookup.
//!
//! The state itself is [`SelectionState`]; this module adds the lookups the
//! detail view needs.

use sectorgrid_domain::{Record, SelectionState};

/// State after a tile click.
pub fn select(sector: &str, code: &str) -> SelectionState {
    SelectionState::select(sector, code)
}

/// State after the detail view is closed.
pub fn clear() -> SelectionState {
    SelectionState::clear()
}

/// Records of one (sector, code) pair, in input order. Empty is valid.
pub fn records_for<'a>(records: &'a [Record], sector: &str, code: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.matches(sector, code)).collect()
}

/// Records behind a selection; empty when unselected.
pub fn detail_for<'a>(state: &SelectionState, records: &'a [Record]) -> Vec<&'a Record> {
    state.detail(records)
}
