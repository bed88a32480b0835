//! The order dashboard session: one listing table with its selection, the
//! redesign message buffer and the submission latch.
//!
//! Long-running bulk work is split into `begin_*` (validate, snapshot, set
//! the latch) and `finish_*` so a host can hold its lock only around the
//! synchronous steps.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{DownloadResolver, ExportVariant, FileRetriever, StateChangeSubmitter};
use crate::bulk::{BulkError, ExportBatch, ExportSummary, RedesignBatch, RedesignReport, ReportKind};
use crate::config::TableConfig;
use crate::table::{
    orders_columns, validate_columns, Column, Row, SelectionSet, SortState, TableError, TableState,
};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("A redesign submission is already in progress")]
    SubmissionInProgress,

    #[error("Unknown order: {0}")]
    UnknownRow(String),

    #[error(transparent)]
    Bulk(#[from] BulkError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Tone of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Last status banner shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionStatus {
    pub text: String,
    pub kind: StatusKind,
}

impl SubmissionStatus {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A rendered row of the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRow {
    pub id: String,
    pub selected: bool,
    pub fields: Map<String, Value>,
}

/// Everything needed to draw the listing.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub rows: Vec<PageRow>,
    pub columns: Vec<Column>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
    pub sort: SortState,
    pub query: String,
    pub selected_count: usize,
    /// Header checkbox state.
    pub all_visible_selected: bool,
    pub is_submitting: bool,
    pub status: Option<SubmissionStatus>,
}

/// Returned by [`OrderDashboard::finish_redesign`].
#[derive(Debug, Clone, Serialize)]
pub struct RedesignCompletion {
    pub report: RedesignReport,
    /// The host must reload orders from the backend.
    pub reload_required: bool,
}

#[derive(Debug, Clone)]
pub struct OrderDashboard {
    rows: Vec<Row>,
    index: HashMap<String, usize>,
    columns: Vec<Column>,
    table: TableState,
    selection: SelectionSet,
    message: String,
    is_submitting: bool,
    status: Option<SubmissionStatus>,
    rows_per_page_options: Vec<usize>,
}

impl OrderDashboard {
    pub fn new(columns: Vec<Column>, config: &TableConfig) -> Result<Self, DashboardError> {
        Ok(Self {
            rows: Vec::new(),
            index: HashMap::new(),
            columns,
            table: TableState::new(config.rows_per_page)?,
            selection: SelectionSet::new(),
            message: String::new(),
            is_submitting: false,
            status: None,
            rows_per_page_options: config.rows_per_page_options.clone(),
        })
    }

    /// Dashboard over the order listing columns.
    pub fn orders(config: &TableConfig) -> Result<Self, DashboardError> {
        Self::new(orders_columns(), config)
    }

    /// Full data reload: replaces the rows and resets table state and
    /// selection. The status banner survives so a report stays visible after
    /// the reload that follows a redesign.
    pub fn load(&mut self, rows: Vec<Row>) {
        let unknown = validate_columns(&self.columns, &rows);
        if !unknown.is_empty() {
            warn!(accessors = ?unknown, "Columns reference fields present on no row");
        }

        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.id().to_string(), i).is_some() {
                warn!(id = row.id(), "Duplicate order id in reload");
            }
        }

        info!(count = rows.len(), "Loaded orders");
        self.rows = rows;
        self.index = index;
        self.table.reset();
        self.selection.clear();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.index.get(id).and_then(|&i| self.rows.get(i))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn status(&self) -> Option<&SubmissionStatus> {
        self.status.as_ref()
    }

    pub fn rows_per_page_options(&self) -> &[usize] {
        &self.rows_per_page_options
    }

    /// Renders the current page, clamping the page number first.
    pub fn page(&mut self) -> DashboardPage {
        let visible = self.table.visible_page(&self.rows, &self.columns);
        let ids = visible.ids();
        let rows = visible
            .rows
            .iter()
            .map(|row| PageRow {
                id: row.id().to_string(),
                selected: self.selection.contains(row.id()),
                fields: row.fields().clone(),
            })
            .collect();

        DashboardPage {
            rows,
            columns: self.columns.clone(),
            total_count: visible.total_count,
            total_pages: visible.total_pages,
            current_page: self.table.pagination().current_page,
            rows_per_page: self.table.pagination().rows_per_page,
            rows_per_page_options: self.rows_per_page_options.clone(),
            sort: self.table.sort().clone(),
            query: self.table.filter().query.clone(),
            selected_count: self.selection.len(),
            all_visible_selected: self.selection.all_selected(&ids),
            is_submitting: self.is_submitting,
            status: self.status.clone(),
        }
    }

    /// Ids of the current page after clamping.
    pub fn visible_ids(&mut self) -> Vec<String> {
        self.table.visible_page(&self.rows, &self.columns).ids()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.table.set_query(query);
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), DashboardError> {
        Ok(self.table.set_rows_per_page(rows_per_page)?)
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), DashboardError> {
        Ok(self.table.set_page(page)?)
    }

    pub fn click_sort(&mut self, key: &str) -> SortState {
        self.table.click_sort(key).clone()
    }

    /// Reset control: clears query, sort, page and selection.
    pub fn reset(&mut self) -> Result<(), DashboardError> {
        self.ensure_idle()?;
        self.table.reset();
        self.selection.clear();
        Ok(())
    }

    /// Flips selection of one order. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> Result<bool, DashboardError> {
        self.ensure_idle()?;
        if !self.index.contains_key(id) {
            return Err(DashboardError::UnknownRow(id.to_string()));
        }
        Ok(self.selection.toggle(id))
    }

    /// Header checkbox over the current page.
    pub fn toggle_all_visible(&mut self) -> Result<bool, DashboardError> {
        self.ensure_idle()?;
        let ids = self.visible_ids();
        Ok(self.selection.toggle_all_visible(&ids))
    }

    pub fn clear_selection(&mut self) -> Result<(), DashboardError> {
        self.ensure_idle()?;
        self.selection.clear();
        Ok(())
    }

    /// Replaces the redesign message; refused while a batch is in flight.
    pub fn set_message(&mut self, message: impl Into<String>) -> Result<(), DashboardError> {
        self.ensure_idle()?;
        self.message = message.into();
        Ok(())
    }

    /// Validates the selection and message and sets the submission latch.
    ///
    /// Validation failures are also recorded as the status banner.
    pub fn begin_redesign(&mut self) -> Result<RedesignBatch, DashboardError> {
        self.ensure_idle()?;

        let index = &self.index;
        let rows = &self.rows;
        let lookup = |id: &str| index.get(id).and_then(|&i| rows.get(i));

        match RedesignBatch::prepare(self.selection.ids(), lookup, &self.message) {
            Ok(batch) => {
                self.is_submitting = true;
                self.status = Some(SubmissionStatus::new(
                    format!("Sending {} order(s) for redesign...", batch.eligible_count()),
                    StatusKind::Info,
                ));
                Ok(batch)
            }
            Err(e) => {
                self.status = Some(match e.report() {
                    Some(report) => SubmissionStatus::new(report.text(), StatusKind::Info),
                    None => SubmissionStatus::new(e.to_string(), StatusKind::Error),
                });
                Err(e.into())
            }
        }
    }

    /// Completes a redesign: clears the message and selection, releases the
    /// latch and records the report as the status banner.
    pub fn finish_redesign(&mut self, report: RedesignReport) -> RedesignCompletion {
        let kind = match report.kind {
            ReportKind::Success => StatusKind::Success,
            ReportKind::Partial | ReportKind::Info => StatusKind::Info,
            ReportKind::Failure => StatusKind::Error,
        };
        self.status = Some(SubmissionStatus::new(report.text(), kind));
        self.message.clear();
        self.selection.clear();
        self.is_submitting = false;

        RedesignCompletion {
            report,
            reload_required: true,
        }
    }

    /// Releases the latch after a batch that never produced a report. The
    /// selection and message are kept so the user can retry.
    pub fn abort_redesign(&mut self, reason: &str) {
        warn!(reason, "Redesign batch aborted");
        self.is_submitting = false;
        self.status = Some(SubmissionStatus::new(
            format!("Redesign failed: {}", reason),
            StatusKind::Error,
        ));
    }

    /// Runs a whole redesign batch against `submitter`.
    pub async fn send_for_redesign(
        &mut self,
        submitter: &dyn StateChangeSubmitter,
    ) -> Result<RedesignCompletion, DashboardError> {
        let batch = self.begin_redesign()?;
        let report = batch.execute(submitter).await;
        Ok(self.finish_redesign(report))
    }

    /// Snapshots the selection for an export. The selection is kept.
    pub fn begin_export(&self, variant: ExportVariant) -> Result<ExportBatch, DashboardError> {
        let lookup = |id: &str| self.row(id);
        Ok(ExportBatch::prepare(self.selection.ids(), lookup, variant)?)
    }

    /// Records an export summary as the status banner.
    pub fn finish_export(&mut self, summary: &ExportSummary) {
        let kind = if summary.is_complete() {
            StatusKind::Success
        } else if summary.downloaded == 0 {
            StatusKind::Error
        } else {
            StatusKind::Info
        };
        self.status = Some(SubmissionStatus::new(summary.message(), kind));
    }

    /// Exports the selected orders' files for `variant`.
    pub async fn export_selected(
        &mut self,
        variant: ExportVariant,
        resolver: &dyn DownloadResolver,
        retriever: &dyn FileRetriever,
    ) -> Result<ExportSummary, DashboardError> {
        let batch = self.begin_export(variant)?;
        let summary = batch.execute(resolver, retriever).await;
        self.finish_export(&summary);
        Ok(summary)
    }

    fn ensure_idle(&self) -> Result<(), DashboardError> {
        if self.is_submitting {
            Err(DashboardError::SubmissionInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockFileRetriever, MockStateChangeSubmitter};
    use crate::bulk::RowFieldResolver;

    fn dashboard(rows: Vec<Row>) -> OrderDashboard {
        let mut dashboard = OrderDashboard::orders(&TableConfig::default()).unwrap();
        dashboard.load(rows);
        dashboard
    }

    fn sample() -> Vec<Row> {
        vec![
            fixtures::order("A", "New"),
            fixtures::order("B", "Pending"),
            fixtures::order("C", "Redesign"),
        ]
    }

    #[test]
    fn test_page_marks_selected_rows() {
        let mut dashboard = dashboard(sample());
        dashboard.toggle("B").unwrap();

        let page = dashboard.page();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.selected_count, 1);
        assert!(!page.all_visible_selected);
        let selected: Vec<&str> = page
            .rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(selected, vec!["B"]);
    }

    #[test]
    fn test_toggle_unknown_row() {
        let mut dashboard = dashboard(sample());
        let err = dashboard.toggle("Z").unwrap_err();
        assert!(matches!(err, DashboardError::UnknownRow(id) if id == "Z"));
    }

    #[test]
    fn test_toggle_all_visible_only_touches_current_page() {
        let mut dashboard = dashboard(fixtures::numbered_orders(30));
        dashboard.set_rows_per_page(10).unwrap();
        dashboard.toggle("25").unwrap();

        assert!(dashboard.toggle_all_visible().unwrap());
        assert_eq!(dashboard.selection().len(), 11);
        assert!(dashboard.page().all_visible_selected);

        assert!(!dashboard.toggle_all_visible().unwrap());
        assert_eq!(dashboard.selection().ids(), &["25".to_string()]);
    }

    #[test]
    fn test_load_resets_table_and_selection() {
        let mut dashboard = dashboard(fixtures::numbered_orders(30));
        dashboard.set_rows_per_page(10).unwrap();
        dashboard.set_page(3).unwrap();
        dashboard.toggle("1").unwrap();

        dashboard.load(fixtures::numbered_orders(5));
        let page = dashboard.page();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.rows_per_page, 50);
        assert_eq!(page.selected_count, 0);
    }

    #[test]
    fn test_begin_redesign_sets_latch_and_blocks_edits() {
        let mut dashboard = dashboard(sample());
        dashboard.toggle("B").unwrap();
        dashboard.set_message("make it pop").unwrap();

        let batch = dashboard.begin_redesign().unwrap();
        assert_eq!(batch.message(), "make it pop");
        assert!(dashboard.is_submitting());

        assert!(matches!(
            dashboard.toggle("A"),
            Err(DashboardError::SubmissionInProgress)
        ));
        assert!(matches!(
            dashboard.clear_selection(),
            Err(DashboardError::SubmissionInProgress)
        ));
        assert!(matches!(
            dashboard.begin_redesign(),
            Err(DashboardError::SubmissionInProgress)
        ));
    }

    #[test]
    fn test_message_is_frozen_during_batch() {
        let mut dashboard = dashboard(sample());
        dashboard.toggle("B").unwrap();
        dashboard.set_message("fix").unwrap();
        let batch = dashboard.begin_redesign().unwrap();

        assert!(matches!(
            dashboard.set_message("typed while sending"),
            Err(DashboardError::SubmissionInProgress)
        ));
        assert_eq!(dashboard.message(), "fix");
        assert_eq!(batch.message(), "fix");
    }

    #[test]
    fn test_abort_redesign_keeps_selection() {
        let mut dashboard = dashboard(sample());
        dashboard.toggle("B").unwrap();
        dashboard.set_message("fix").unwrap();
        dashboard.begin_redesign().unwrap();

        dashboard.abort_redesign("task panicked");
        assert!(!dashboard.is_submitting());
        assert_eq!(dashboard.selection().len(), 1);
        assert_eq!(dashboard.message(), "fix");
        assert_eq!(dashboard.status().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_begin_redesign_validation_records_status() {
        let mut dashboard = dashboard(sample());
        dashboard.toggle("A").unwrap();

        let err = dashboard.begin_redesign().unwrap_err();
        assert!(matches!(err, DashboardError::Bulk(BulkError::NothingEligible(_))));
        assert!(!dashboard.is_submitting());
        assert_eq!(
            dashboard.status().unwrap().text,
            "Order A cannot be redesigned because it is a new order."
        );
        assert_eq!(dashboard.selection().len(), 1);
    }

    #[tokio::test]
    async fn test_send_for_redesign_clears_state() {
        let mut dashboard = dashboard(sample());
        for id in ["A", "B", "C"] {
            dashboard.toggle(id).unwrap();
        }
        dashboard.set_message("  thicker walls ").unwrap();
        let submitter = MockStateChangeSubmitter::new();

        let completion = dashboard.send_for_redesign(&submitter).await.unwrap();

        assert!(completion.reload_required);
        assert_eq!(completion.report.lines.len(), 3);
        assert!(dashboard.selection().is_empty());
        assert_eq!(dashboard.message(), "");
        assert!(!dashboard.is_submitting());
        assert_eq!(dashboard.status().unwrap().kind, StatusKind::Success);
        assert_eq!(submitter.recorded_calls().await[0].message, "thicker walls");
    }

    #[tokio::test]
    async fn test_export_selected_keeps_selection() {
        let mut dashboard = dashboard(vec![
            fixtures::order_with_files("A", "Completed", &[(ExportVariant::Stl, "a.stl")]),
            fixtures::order("B", "Completed"),
        ]);
        dashboard.toggle("A").unwrap();
        dashboard.toggle("B").unwrap();
        let retriever = MockFileRetriever::new();

        let summary = dashboard
            .export_selected(ExportVariant::Stl, &RowFieldResolver, &retriever)
            .await
            .unwrap();

        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.missing, vec!["B"]);
        assert_eq!(dashboard.selection().len(), 2);
        assert_eq!(dashboard.status().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_export_requires_selection() {
        let dashboard = dashboard(sample());
        let err = dashboard.begin_export(ExportVariant::Original).unwrap_err();
        assert!(matches!(err, DashboardError::Bulk(BulkError::EmptySelection)));
    }
}
