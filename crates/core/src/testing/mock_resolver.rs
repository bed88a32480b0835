//! Mock download resolver for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::{BackendError, DownloadResolver, ExportVariant};
use crate::table::Row;

/// Mock implementation of the DownloadResolver trait.
///
/// Paths are scripted per `(id, variant)`; errors per id. Anything not
/// scripted resolves to `None`.
#[derive(Debug, Clone, Default)]
pub struct MockDownloadResolver {
    paths: Arc<RwLock<HashMap<(String, ExportVariant), String>>>,
    errors: Arc<RwLock<HashMap<String, BackendError>>>,
    lookups: Arc<RwLock<Vec<(String, ExportVariant)>>>,
}

impl MockDownloadResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `id` to `path` for `variant`.
    pub async fn set_path(&self, id: &str, variant: ExportVariant, path: &str) {
        self.paths
            .write()
            .await
            .insert((id.to_string(), variant), path.to_string());
    }

    /// Fail every lookup for `id`.
    pub async fn set_error(&self, id: &str, error: BackendError) {
        self.errors.write().await.insert(id.to_string(), error);
    }

    /// Lookups performed, in call order.
    pub async fn recorded_lookups(&self) -> Vec<(String, ExportVariant)> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl DownloadResolver for MockDownloadResolver {
    async fn resolve_download_target(
        &self,
        row: &Row,
        variant: ExportVariant,
    ) -> Result<Option<String>, BackendError> {
        let id = row.id().to_string();
        self.lookups.write().await.push((id.clone(), variant));

        if let Some(error) = self.errors.read().await.get(&id) {
            return Err(error.clone());
        }
        Ok(self.paths.read().await.get(&(id, variant)).cloned())
    }
}
