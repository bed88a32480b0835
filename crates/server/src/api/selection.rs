//! Selection API handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use orderdesk_core::OrderDashboard;

use super::error::ApiError;
use crate::state::AppState;

/// Selected ids in selection order
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub ids: Vec<String>,
    pub count: usize,
    /// Whether the toggled id (or the visible page) ended up selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl SelectionResponse {
    fn from_dashboard(dashboard: &OrderDashboard, selected: Option<bool>) -> Self {
        let ids = dashboard.selection().ids().to_vec();
        Self {
            count: ids.len(),
            ids,
            selected,
        }
    }
}

pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<SelectionResponse> {
    let dashboard = state.dashboard().read().await;
    Json(SelectionResponse::from_dashboard(&dashboard, None))
}

/// Row checkbox
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    let selected = dashboard.toggle(&id)?;
    Ok(Json(SelectionResponse::from_dashboard(
        &dashboard,
        Some(selected),
    )))
}

/// Header checkbox over the visible page
pub async fn toggle_visible(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    let selected = dashboard.toggle_all_visible()?;
    Ok(Json(SelectionResponse::from_dashboard(
        &dashboard,
        Some(selected),
    )))
}

pub async fn clear(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    dashboard.clear_selection()?;
    Ok(Json(SelectionResponse::from_dashboard(&dashboard, None)))
}
