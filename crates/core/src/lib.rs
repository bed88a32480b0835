pub mod backend;
pub mod bulk;
pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod table;
pub mod testing;

pub use backend::{
    BackendError, DownloadResolver, ExportVariant, FileRetriever, HttpFileRetriever,
    HttpOrderBackend, OrderSource, StateChangeSubmitter, SubmitResponse,
};
pub use bulk::{
    export_bulk, submit_bulk, BulkError, BulkOutcome, ExportBatch, ExportSummary, RedesignBatch,
    RedesignReport, ReportKind, RowFieldResolver,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use dashboard::{
    DashboardError, DashboardPage, OrderDashboard, RedesignCompletion, StatusKind,
    SubmissionStatus,
};
pub use table::{Column, Row, SelectionSet, TableState};
