//! Mock order source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::{BackendError, OrderSource};
use crate::table::Row;

/// Mock implementation of the OrderSource trait.
///
/// Returns the configured rows on every fetch; `set_next_error` fails the
/// next fetch only.
#[derive(Debug, Clone, Default)]
pub struct MockOrderSource {
    rows: Arc<RwLock<Vec<Row>>>,
    next_error: Arc<RwLock<Option<BackendError>>>,
    fetch_count: Arc<RwLock<usize>>,
}

impl MockOrderSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            ..Self::default()
        }
    }

    /// Replace the rows returned by later fetches.
    pub async fn set_rows(&self, rows: Vec<Row>) {
        *self.rows.write().await = rows;
    }

    /// Change the status of one configured row, as the backend would after
    /// accepting a state change.
    pub async fn set_status(&self, id: &str, status: &str) {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows.iter_mut().find(|r| r.id() == id) {
            let mut fields = row.fields().clone();
            fields.insert(
                crate::table::STATUS_FIELD.to_string(),
                serde_json::Value::String(status.to_string()),
            );
            if let Ok(updated) = Row::from_fields(fields) {
                *row = updated;
            }
        }
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: BackendError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        *self.fetch_count.read().await
    }
}

#[async_trait]
impl OrderSource for MockOrderSource {
    async fn fetch_orders(&self) -> Result<Vec<Row>, BackendError> {
        *self.fetch_count.write().await += 1;
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        Ok(self.rows.read().await.clone())
    }
}
