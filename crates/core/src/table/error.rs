//! Error types for the table module.

use thiserror::Error;

/// Errors raised when editing table state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Rows per page must be positive.
    #[error("rows per page must be greater than zero, got {0}")]
    InvalidRowsPerPage(usize),

    /// Pages are numbered from 1.
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(usize),
}

/// Errors raised when building a row from an untyped record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The identity field is absent, null or blank.
    #[error("row is missing its identity field")]
    MissingId,

    /// The identity field is not a string or a number.
    #[error("row identity must be a string or a number, got {0}")]
    InvalidId(String),
}
