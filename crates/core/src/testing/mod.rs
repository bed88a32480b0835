//! Testing utilities and mock implementations of the backend collaborators.
//!
//! This module provides mock implementations of every collaborator trait,
//! allowing bulk workflows and the hosting service to be tested without a
//! running order backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_core::testing::{fixtures, MockOrderSource, MockStateChangeSubmitter};
//!
//! let source = MockOrderSource::with_rows(vec![
//!     fixtures::order("A1", "Pending"),
//!     fixtures::order("A2", "New"),
//! ]);
//! let submitter = MockStateChangeSubmitter::new();
//!
//! // Configure mock responses
//! submitter.set_response("A1", Ok(SubmitResponse::rejected("error", "Locked"))).await;
//! ```

mod mock_order_source;
mod mock_resolver;
mod mock_retriever;
mod mock_submitter;

pub use mock_order_source::MockOrderSource;
pub use mock_resolver::MockDownloadResolver;
pub use mock_retriever::{MockFileRetriever, RecordedRetrieval};
pub use mock_submitter::{MockStateChangeSubmitter, RecordedSubmission};

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::json;

    use crate::backend::ExportVariant;
    use crate::table::Row;

    /// Create an order row with reasonable defaults.
    pub fn order(id: &str, status: &str) -> Row {
        Row::new(
            id,
            [
                ("fname", json!(format!("{}.zip", id.to_lowercase()))),
                ("status", json!(status)),
                ("customer", json!("Acme Print")),
                ("created_at", json!("2024-01-01")),
            ],
        )
    }

    /// Create an order row carrying file paths for some export variants.
    pub fn order_with_files(id: &str, status: &str, files: &[(ExportVariant, &str)]) -> Row {
        let base = order(id, status);
        let mut fields = base.fields().clone();
        for (variant, path) in files {
            fields.insert(variant.path_field().to_string(), json!(path));
        }
        Row::new(id, fields)
    }

    /// `count` orders with ids `"1"`..=`count` and a numeric `amount`.
    pub fn numbered_orders(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|i| {
                Row::new(
                    i.to_string(),
                    [
                        ("fname", json!(format!("file{}.zip", i))),
                        ("status", json!("Pending")),
                        ("amount", json!(i)),
                    ],
                )
            })
            .collect()
    }
}
