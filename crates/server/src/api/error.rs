//! Mapping of dashboard and backend errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use orderdesk_core::{BackendError, BulkError, DashboardError, RedesignReport};

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Classification report when nothing in the selection was eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RedesignReport>,
}

/// An error returned by an API handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub report: Option<RedesignReport>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            report: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let message = err.to_string();
        match err {
            DashboardError::SubmissionInProgress => Self::new(StatusCode::CONFLICT, message),
            DashboardError::UnknownRow(_) => Self::new(StatusCode::NOT_FOUND, message),
            DashboardError::Bulk(BulkError::NothingEligible(report)) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                report: Some(*report),
            },
            DashboardError::Bulk(_) | DashboardError::Table(_) => {
                Self::new(StatusCode::BAD_REQUEST, message)
            }
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                report: self.report,
            }),
        )
            .into_response()
    }
}
