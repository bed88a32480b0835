//! Mock file retriever for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::FileRetriever;

/// A recorded retrieval for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRetrieval {
    pub path: String,
    pub filename: String,
}

/// Mock implementation of the FileRetriever trait. Records every call and
/// downloads nothing.
#[derive(Debug, Clone, Default)]
pub struct MockFileRetriever {
    retrievals: Arc<RwLock<Vec<RecordedRetrieval>>>,
}

impl MockFileRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded retrievals.
    pub async fn recorded_retrievals(&self) -> Vec<RecordedRetrieval> {
        self.retrievals.read().await.clone()
    }

    /// Clear recorded retrievals.
    pub async fn clear_recorded_retrievals(&self) {
        self.retrievals.write().await.clear();
    }
}

#[async_trait]
impl FileRetriever for MockFileRetriever {
    async fn retrieve(&self, path: &str, suggested_filename: &str) {
        self.retrievals.write().await.push(RecordedRetrieval {
            path: path.to_string(),
            filename: suggested_filename.to_string(),
        });
    }
}
