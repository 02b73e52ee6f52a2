//! Selection commands: per-session click and close transitions, detail lookup.

use sectorgrid_domain::{
    Record, Result as DomainResult, SectorGridError, SelectionEvent, SelectionState, SkuTile,
};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::grid::load_inventory_view;
use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub selection: SelectionState,
}

/// Records behind the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub session_id: Uuid,
    pub selection: SelectionState,
    /// The aggregated tile for the selected pair, if it still exists.
    pub tile: Option<SkuTile>,
    pub records: Vec<Record>,
}

pub async fn create_session(ctx: &AppContext) -> DomainResult<SessionResponse> {
    execute_logged("selection::create_session", "json", || async {
        let session_id = ctx.sessions.create();
        Ok(SessionResponse { session_id, selection: SelectionState::Unselected })
    })
    .await
}

pub async fn get_session(ctx: &AppContext, session_id: Uuid) -> DomainResult<SessionResponse> {
    execute_logged("selection::get_session", "json", || async {
        Ok(SessionResponse { session_id, selection: ctx.sessions.get(session_id)? })
    })
    .await
}

/// Apply a click or close event to a session.
///
/// # Errors
/// Returns `SectorGridError::InvalidInput` for a click with a blank sector or
/// code, and `SectorGridError::NotFound` for an unknown session.
pub async fn apply_selection_event(
    ctx: &AppContext,
    session_id: Uuid,
    event: SelectionEvent,
) -> DomainResult<SessionResponse> {
    execute_logged("selection::apply_selection_event", "json", || async {
        if let SelectionEvent::TileClicked { sector, code } = &event {
            if sector.trim().is_empty() || code.trim().is_empty() {
                return Err(SectorGridError::InvalidInput(
                    "a tile click needs both a sector and a code".into(),
                ));
            }
        }
        let selection = ctx.sessions.apply(session_id, event)?;
        Ok(SessionResponse { session_id, selection })
    })
    .await
}

pub async fn select_tile(
    ctx: &AppContext,
    session_id: Uuid,
    sector: String,
    code: String,
) -> DomainResult<SessionResponse> {
    apply_selection_event(ctx, session_id, SelectionEvent::TileClicked { sector, code }).await
}

pub async fn clear_selection(ctx: &AppContext, session_id: Uuid) -> DomainResult<SessionResponse> {
    apply_selection_event(ctx, session_id, SelectionEvent::CloseClicked).await
}

/// Matching records for the session's selection, read from the current snapshot.
pub async fn get_selection_detail(
    ctx: &AppContext,
    session_id: Uuid,
) -> DomainResult<DetailResponse> {
    let selection = ctx.sessions.get(session_id)?;
    let view = load_inventory_view(ctx, "json").await?;

    let records = view.detail(&selection).into_iter().cloned().collect();
    let tile = selection
        .target()
        .and_then(|(sector, code)| view.aggregate.tile(sector, code))
        .cloned();

    Ok(DetailResponse { session_id, selection, tile, records })
}
