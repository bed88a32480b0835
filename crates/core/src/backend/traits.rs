//! Trait definitions for the collaborators the bulk workflows call out to.

use async_trait::async_trait;

use crate::table::Row;

use super::error::BackendError;
use super::types::{ExportVariant, SubmitResponse};

/// Source of the full order list.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetches every order row.
    async fn fetch_orders(&self) -> Result<Vec<Row>, BackendError>;
}

/// Submits a state-change request for one order.
#[async_trait]
pub trait StateChangeSubmitter: Send + Sync {
    /// Sends `message` as the redesign request for order `id`.
    async fn submit_state_change(
        &self,
        id: &str,
        message: &str,
    ) -> Result<SubmitResponse, BackendError>;
}

/// Finds where a variant of an order's files lives.
#[async_trait]
pub trait DownloadResolver: Send + Sync {
    /// Returns the file path, or `None` when the order has no such file.
    async fn resolve_download_target(
        &self,
        row: &Row,
        variant: ExportVariant,
    ) -> Result<Option<String>, BackendError>;
}

/// Starts retrieval of a resolved file. Fire-and-forget.
#[async_trait]
pub trait FileRetriever: Send + Sync {
    async fn retrieve(&self, path: &str, suggested_filename: &str);
}
