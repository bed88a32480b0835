//! Error types for bulk actions.

use thiserror::Error;

use super::report::RedesignReport;

/// Validation failures. Raised before any collaborator is called.
#[derive(Debug, Clone, Error)]
pub enum BulkError {
    #[error("No orders selected")]
    EmptySelection,

    /// Every selected order was skipped during classification. The report
    /// explains why.
    #[error("None of the selected orders can be sent for redesign")]
    NothingEligible(Box<RedesignReport>),

    #[error("Redesign message cannot be empty")]
    EmptyMessage,
}

impl BulkError {
    /// Classification report attached to `NothingEligible`.
    pub fn report(&self) -> Option<&RedesignReport> {
        match self {
            Self::NothingEligible(report) => Some(report),
            _ => None,
        }
    }
}
