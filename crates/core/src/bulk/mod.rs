//! Bulk actions over the selected orders.
//!
//! Both actions follow the same two-step shape: `prepare` validates the
//! selection against a snapshot of the rows and returns an owned batch,
//! `execute` drives the collaborators and aggregates the results. Neither
//! step fails once preparation has succeeded.
//!
//! - Redesign: classifies each order by status, submits the eligible ones
//!   sequentially and renders a [`RedesignReport`].
//! - Export: resolves one file per order for an [`ExportVariant`] and hands
//!   it to a [`FileRetriever`], collecting the ids with no file.
//!
//! [`ExportVariant`]: crate::backend::ExportVariant
//! [`FileRetriever`]: crate::backend::FileRetriever

mod error;
mod export;
mod redesign;
mod report;
mod types;

pub use error::BulkError;
pub use export::{export_bulk, export_filename, ExportBatch, ExportSummary, RowFieldResolver};
pub use redesign::{submit_bulk, RedesignBatch};
pub use report::{render, RedesignReport, FAILED_REQUESTS_HEADING};
pub use types::{
    BulkOutcome, Classification, IdOutcome, ReportKind, NEW_STATUS, NOT_FOUND_REASON,
    REDESIGN_STATUS, REJECTED_REASON, SERVER_ERROR_REASON,
};
