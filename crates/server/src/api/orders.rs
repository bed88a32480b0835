//! Listing API handlers: the current page and the table controls.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use orderdesk_core::DashboardPage;

use super::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct RowsPerPageBody {
    pub rows_per_page: usize,
}

#[derive(Debug, Deserialize)]
pub struct PageBody {
    pub page: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// Current page of the listing
pub async fn get_orders(State(state): State<Arc<AppState>>) -> Json<DashboardPage> {
    Json(state.dashboard().write().await.page())
}

/// Full reload from the order backend
pub async fn reload_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardPage>, ApiError> {
    state.reload().await?;
    Ok(Json(state.dashboard().write().await.page()))
}

/// Set the search query (back to page 1)
pub async fn set_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> Json<DashboardPage> {
    let mut dashboard = state.dashboard().write().await;
    dashboard.set_query(body.query);
    Json(dashboard.page())
}

/// Set the page size (back to page 1)
pub async fn set_rows_per_page(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RowsPerPageBody>,
) -> Result<Json<DashboardPage>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    dashboard.set_rows_per_page(body.rows_per_page)?;
    Ok(Json(dashboard.page()))
}

/// Jump to a page; out-of-range pages are clamped
pub async fn set_page(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PageBody>,
) -> Result<Json<DashboardPage>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    dashboard.set_page(body.page)?;
    Ok(Json(dashboard.page()))
}

/// Column header click: asc, desc, then unsorted
pub async fn click_sort(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<DashboardPage>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    if !dashboard.columns().iter().any(|c| c.accessor == key) {
        return Err(ApiError::bad_request(format!("Unknown column: {}", key)));
    }
    let sort = dashboard.click_sort(&key);
    debug!(key = ?sort.key, direction = sort.direction.as_str(), "Sort changed");
    Ok(Json(dashboard.page()))
}

/// Reset control: query, sort, page and selection
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<DashboardPage>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    dashboard.reset()?;
    Ok(Json(dashboard.page()))
}
