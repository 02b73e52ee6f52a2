//! Grid commands: load the view, refresh the snapshot.

use chrono::{DateTime, Utc};
use sectorgrid_core::{InventoryView, SkippedRecords};
use sectorgrid_domain::{GridModel, Result as DomainResult};
use serde::Serialize;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Grid model plus load metadata.
#[derive(Debug, Clone, Serialize)]
pub struct GridResponse {
    pub grid: GridModel,
    pub loaded_at: DateTime<Utc>,
    pub record_count: usize,
    pub skipped: SkippedRecords,
}

impl From<&InventoryView> for GridResponse {
    fn from(view: &InventoryView) -> Self {
        Self {
            grid: view.grid.clone(),
            loaded_at: view.snapshot.loaded_at,
            record_count: view.snapshot.records.len(),
            skipped: view.aggregate.skipped,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RefreshResponse {
    pub invalidated: bool,
}

/// Load (or reuse the cached) snapshot and derive the full view.
pub async fn load_inventory_view(ctx: &AppContext, surface: &str) -> DomainResult<InventoryView> {
    execute_logged("grid::load_inventory_view", surface, || ctx.grid_service.load_view()).await
}

/// Grid model for the JSON surface.
pub async fn get_grid_view(ctx: &AppContext) -> DomainResult<GridResponse> {
    let view = load_inventory_view(ctx, "json").await?;
    Ok(GridResponse::from(&view))
}

/// Drop the cached snapshot so the next render reads the table again.
pub async fn refresh_inventory(ctx: &AppContext) -> DomainResult<RefreshResponse> {
    execute_logged("grid::refresh_inventory", "json", || async {
        ctx.source.invalidate().await;
        Ok(RefreshResponse { invalidated: true })
    })
    .await
}
