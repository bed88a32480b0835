//! Mock state-change submitter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::{BackendError, StateChangeSubmitter, SubmitResponse};

/// A recorded submission for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    /// The order id that was submitted.
    pub id: String,
    /// The message sent with it.
    pub message: String,
}

/// Mock implementation of the StateChangeSubmitter trait.
///
/// Provides controllable behavior for testing:
/// - Accept every order by default
/// - Script a response or error per order id
/// - Fail the next call regardless of id
/// - Track submissions in call order
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::testing::MockStateChangeSubmitter;
///
/// let submitter = MockStateChangeSubmitter::new();
/// submitter.set_response("B", Ok(SubmitResponse::rejected("error", "Locked"))).await;
///
/// let report = submit_bulk(&ids, lookup, "fix", &submitter).await?;
///
/// let calls = submitter.recorded_calls().await;
/// assert_eq!(calls[0].id, "A");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockStateChangeSubmitter {
    /// Recorded submissions.
    calls: Arc<RwLock<Vec<RecordedSubmission>>>,
    /// Scripted results by order id.
    responses: Arc<RwLock<HashMap<String, Result<SubmitResponse, BackendError>>>>,
    /// If set, the next submission will fail with this error.
    next_error: Arc<RwLock<Option<BackendError>>>,
}

impl MockStateChangeSubmitter {
    /// Create a new mock submitter that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result returned for `id`.
    pub async fn set_response(&self, id: &str, result: Result<SubmitResponse, BackendError>) {
        self.responses.write().await.insert(id.to_string(), result);
    }

    /// Configure the next submission to fail with the given error.
    pub async fn set_next_error(&self, error: BackendError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Get all recorded submissions.
    pub async fn recorded_calls(&self) -> Vec<RecordedSubmission> {
        self.calls.read().await.clone()
    }

    /// Get the number of submissions performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl StateChangeSubmitter for MockStateChangeSubmitter {
    async fn submit_state_change(
        &self,
        id: &str,
        message: &str,
    ) -> Result<SubmitResponse, BackendError> {
        self.calls.write().await.push(RecordedSubmission {
            id: id.to_string(),
            message: message.to_string(),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        match self.responses.read().await.get(id) {
            Some(result) => result.clone(),
            None => Ok(SubmitResponse::success()),
        }
    }
}
