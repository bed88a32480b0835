//! Outcome and classification types for bulk actions.

use serde::{Deserialize, Serialize};

use crate::table::Row;

/// Status of an order that has not been worked on yet.
pub const NEW_STATUS: &str = "New";

/// Status of an order already in the redesign process.
pub const REDESIGN_STATUS: &str = "Redesign";

/// Reason recorded when the submitter itself errors.
pub const SERVER_ERROR_REASON: &str = "Server error. Please try again later.";

/// Reason recorded when a selected id has no matching row.
pub const NOT_FOUND_REASON: &str = "Order not found.";

/// Reason recorded when the backend rejects a request without explanation.
pub const REJECTED_REASON: &str = "Request was rejected by the server.";

/// How an order's status affects a redesign request, decided before any
/// request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NotFound,
    IneligibleNew,
    AlreadyInTargetState,
    Eligible,
}

impl Classification {
    pub fn of(row: Option<&Row>) -> Self {
        match row {
            None => Self::NotFound,
            Some(row) => match row.status() {
                Some(NEW_STATUS) => Self::IneligibleNew,
                Some(REDESIGN_STATUS) => Self::AlreadyInTargetState,
                _ => Self::Eligible,
            },
        }
    }

    pub fn is_eligible(self) -> bool {
        self == Self::Eligible
    }

    /// Outcome of an id that is never submitted. `None` for eligible ids.
    pub fn skipped_outcome(self) -> Option<BulkOutcome> {
        match self {
            Self::NotFound => Some(BulkOutcome::NotFound),
            Self::IneligibleNew => Some(BulkOutcome::IneligibleNew),
            Self::AlreadyInTargetState => Some(BulkOutcome::AlreadyInTargetState),
            Self::Eligible => None,
        }
    }
}

/// Final outcome of one selected id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum BulkOutcome {
    IneligibleNew,
    AlreadyInTargetState,
    Succeeded,
    Failed(String),
    NotFound,
}

impl BulkOutcome {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::IneligibleNew => "ineligible_new",
            Self::AlreadyInTargetState => "already_in_target_state",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
            Self::NotFound => "not_found",
        }
    }

    /// Failure reason shown under "Failed Requests".
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            Self::NotFound => Some(NOT_FOUND_REASON),
            _ => None,
        }
    }
}

/// An id paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdOutcome {
    pub id: String,
    pub outcome: BulkOutcome,
}

impl IdOutcome {
    pub fn new(id: impl Into<String>, outcome: BulkOutcome) -> Self {
        Self {
            id: id.into(),
            outcome,
        }
    }
}

/// Overall tone of a redesign report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Every submitted order went through.
    Success,
    /// Some submissions succeeded, some failed.
    Partial,
    /// Nothing that was submitted succeeded.
    Failure,
    /// Nothing was submitted.
    Info,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failure => "failure",
            Self::Info => "info",
        }
    }
}
