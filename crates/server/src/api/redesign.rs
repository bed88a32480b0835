//! Redesign API handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use orderdesk_core::RedesignReport;

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Result of a redesign batch
#[derive(Debug, Serialize)]
pub struct RedesignResponse {
    pub report: RedesignReport,
    /// Whether the follow-up reload succeeded.
    pub reloaded: bool,
}

/// Store the redesign message buffer
pub async fn set_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MessageBody>,
) -> Result<Json<MessageBody>, ApiError> {
    let mut dashboard = state.dashboard().write().await;
    dashboard.set_message(body.message)?;
    Ok(Json(MessageBody {
        message: dashboard.message().to_string(),
    }))
}

/// Send the selected orders for redesign, then reload the listing.
///
/// The batch runs on its own task so the submission latch is always
/// released, even if the client goes away mid-batch.
pub async fn submit(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RedesignResponse>, ApiError> {
    let batch = state.dashboard().write().await.begin_redesign()?;
    info!(batch_id = %batch.batch_id(), eligible = batch.eligible_count(), "Redesign batch started");

    let task_state = Arc::clone(&state);
    let handle = tokio::spawn(async move {
        let submitter = task_state.submitter();
        let report = batch.execute(submitter.as_ref()).await;
        let completion = task_state.dashboard().write().await.finish_redesign(report);
        let reloaded = if completion.reload_required {
            task_state.reload().await.is_ok()
        } else {
            false
        };
        RedesignResponse {
            report: completion.report,
            reloaded,
        }
    });

    match handle.await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(error = %e, "Redesign task failed");
            state
                .dashboard()
                .write()
                .await
                .abort_redesign(&e.to_string());
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Redesign batch failed",
            ))
        }
    }
}
