//! Collaborators the dashboard talks to: the order backend and file downloads.
//!
//! The bulk workflows only see the traits defined here. `HttpOrderBackend`
//! and `HttpFileRetriever` are the production implementations; the
//! `testing` module provides mocks.

mod error;
mod http;
mod retriever;
mod traits;
mod types;

pub use error::BackendError;
pub use http::HttpOrderBackend;
pub use retriever::{sanitize_filename, HttpFileRetriever};
pub use traits::{DownloadResolver, FileRetriever, OrderSource, StateChangeSubmitter};
pub use types::{
    DownloadTargetResponse, ExportVariant, RedesignRequestBody, SubmitResponse, UnknownVariant,
    SUCCESS_STATUS,
};
