//! Export API handler.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use orderdesk_core::{ExportSummary, ExportVariant};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    /// `original`, `intermediate`, `finished` or `stl`
    pub variant: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    #[serde(flatten)]
    pub summary: ExportSummary,
    pub message: String,
}

/// Export the selected orders' files. The selection is kept.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExportBody>,
) -> Result<Json<ExportResponse>, ApiError> {
    let variant = body
        .variant
        .parse::<ExportVariant>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let batch = state.dashboard().read().await.begin_export(variant)?;

    let resolver = state.resolver();
    let retriever = state.retriever();
    let summary = batch.execute(resolver.as_ref(), retriever.as_ref()).await;

    state.dashboard().write().await.finish_export(&summary);

    Ok(Json(ExportResponse {
        message: summary.message(),
        summary,
    }))
}
