//! HTTP surface: JSON API, HTML tile page, health.

mod error;
mod page;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sectorgrid_domain::{SectorGridError, SelectionEvent, SelectionState};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

pub use error::{status_for, ApiError};
pub use page::{render_error_page, render_page, PageLinks};

use crate::commands::{self, load_inventory_view};
use crate::context::AppContext;

type AppState = Arc<AppContext>;

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(grid_page))
        .route("/health", get(health))
        .route("/api/grid", get(grid_json))
        .route("/api/refresh", post(refresh))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/events", post(session_event))
        .route("/api/sessions/{id}/select", post(select_tile))
        .route("/api/sessions/{id}/clear", post(clear_selection))
        .route("/api/sessions/{id}/detail", get(selection_detail))
        .with_state(ctx)
}

// ============================================================================
// JSON API
// ============================================================================

async fn grid_json(State(ctx): State<AppState>) -> Result<Response, ApiError> {
    Ok(Json(commands::get_grid_view(&ctx).await?).into_response())
}

async fn refresh(State(ctx): State<AppState>) -> Result<Response, ApiError> {
    Ok(Json(commands::refresh_inventory(&ctx).await?).into_response())
}

async fn create_session(State(ctx): State<AppState>) -> Result<Response, ApiError> {
    let session = commands::create_session(&ctx).await?;
    Ok((StatusCode::CREATED, Json(session)).into_response())
}

async fn get_session(
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    Ok(Json(commands::get_session(&ctx, id).await?).into_response())
}

async fn session_event(
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<SelectionEvent>,
) -> Result<Response, ApiError> {
    Ok(Json(commands::apply_selection_event(&ctx, id, event).await?).into_response())
}

#[derive(Debug, Deserialize)]
struct SelectRequest {
    sector: String,
    code: String,
}

async fn select_tile(
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> Result<Response, ApiError> {
    Ok(Json(commands::select_tile(&ctx, id, request.sector, request.code).await?).into_response())
}

async fn clear_selection(
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    Ok(Json(commands::clear_selection(&ctx, id).await?).into_response())
}

async fn selection_detail(
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    Ok(Json(commands::get_selection_detail(&ctx, id).await?).into_response())
}

async fn health(State(ctx): State<AppState>) -> Response {
    let status = commands::get_app_health(&ctx).await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status)).into_response()
}

// ============================================================================
// HTML page
// ============================================================================

/// Query parameters of the tile page.
///
/// Tiles link back to the page with `sector` and `code` set; the close link
/// sets `close`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub session: Option<Uuid>,
    pub sector: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub close: bool,
}

impl PageQuery {
    fn event(&self) -> Option<SelectionEvent> {
        if self.close {
            return Some(SelectionEvent::CloseClicked);
        }
        match (&self.sector, &self.code) {
            (Some(sector), Some(code)) if !sector.is_empty() && !code.is_empty() => {
                Some(SelectionEvent::TileClicked { sector: sector.clone(), code: code.clone() })
            }
            _ => None,
        }
    }
}

async fn grid_page(State(ctx): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let (session_id, mut selection) = ctx.sessions.get_or_create(query.session);
    if let Some(event) = query.event() {
        selection = match ctx.sessions.apply(session_id, event) {
            Ok(next) => next,
            Err(err) => {
                warn!(session = %session_id, error = %err, "selection event rejected");
                SelectionState::Unselected
            }
        };
    }

    let links = PageLinks::new(session_id);
    match load_inventory_view(&ctx, "html").await {
        Ok(view) => Html(render_page(&view, &selection, &links)).into_response(),
        Err(err) => page_error(&err),
    }
}

fn page_error(err: &SectorGridError) -> Response {
    (status_for(err), Html(render_error_page(err))).into_response()
}
