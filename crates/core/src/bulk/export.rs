//! Bulk export: resolve one file per selected order and hand it to the
//! retriever.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::backend::{BackendError, DownloadResolver, ExportVariant, FileRetriever};
use crate::metrics;
use crate::table::Row;

use super::error::BulkError;

/// Result of an export batch.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub batch_id: Uuid,
    pub variant: ExportVariant,
    /// Files handed to the retriever.
    pub downloaded: usize,
    /// Ids with no row, no file or a failed lookup, in selection order.
    pub missing: Vec<String>,
}

impl ExportSummary {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Status line shown after the export.
    pub fn message(&self) -> String {
        if self.missing.is_empty() {
            format!("{} file(s) downloaded.", self.downloaded)
        } else {
            format!(
                "{} file(s) downloaded. {} file(s) could not be found: {}.",
                self.downloaded,
                self.missing.len(),
                self.missing.join(", ")
            )
        }
    }
}

/// A validated export batch.
///
/// Rows are cloned at preparation time so the batch can run without access
/// to the session that produced it.
#[derive(Debug, Clone)]
pub struct ExportBatch {
    batch_id: Uuid,
    variant: ExportVariant,
    entries: Vec<(String, Option<Row>)>,
}

impl ExportBatch {
    pub fn prepare<'r, S, F>(
        selected: &[S],
        lookup: F,
        variant: ExportVariant,
    ) -> Result<Self, BulkError>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<&'r Row>,
    {
        if selected.is_empty() {
            return Err(BulkError::EmptySelection);
        }

        let entries = selected
            .iter()
            .map(|id| {
                let id = id.as_ref();
                (id.to_string(), lookup(id).cloned())
            })
            .collect();

        Ok(Self {
            batch_id: Uuid::new_v4(),
            variant,
            entries,
        })
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    pub fn variant(&self) -> ExportVariant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves and retrieves each file in selection order.
    pub async fn execute(
        self,
        resolver: &dyn DownloadResolver,
        retriever: &dyn FileRetriever,
    ) -> ExportSummary {
        let span = info_span!(
            "export_batch",
            batch_id = %self.batch_id,
            variant = %self.variant,
            selected = self.entries.len()
        );

        async move {
            let started = Instant::now();
            let mut downloaded = 0;
            let mut missing = Vec::new();

            for (id, row) in &self.entries {
                let Some(row) = row else {
                    debug!(%id, "Export row not found");
                    missing.push(id.clone());
                    continue;
                };

                match resolver.resolve_download_target(row, self.variant).await {
                    Ok(Some(path)) if !path.trim().is_empty() => {
                        let filename = export_filename(self.variant, id, &path);
                        debug!(%id, %path, %filename, "Retrieving export file");
                        retriever.retrieve(&path, &filename).await;
                        downloaded += 1;
                    }
                    Ok(_) => {
                        debug!(%id, "No export file for order");
                        missing.push(id.clone());
                    }
                    Err(e) => {
                        warn!(
                            %id,
                            error = %e,
                            retryable = e.is_retryable(),
                            "Export lookup failed"
                        );
                        missing.push(id.clone());
                    }
                }
            }

            metrics::EXPORT_FILES
                .with_label_values(&["downloaded"])
                .inc_by(downloaded as u64);
            metrics::EXPORT_FILES
                .with_label_values(&["missing"])
                .inc_by(missing.len() as u64);
            metrics::BULK_BATCHES.with_label_values(&["export"]).inc();
            metrics::BULK_BATCH_DURATION
                .with_label_values(&["export"])
                .observe(started.elapsed().as_secs_f64());

            info!(downloaded, missing = missing.len(), "Export batch complete");

            ExportSummary {
                batch_id: self.batch_id,
                variant: self.variant,
                downloaded,
                missing,
            }
        }
        .instrument(span)
        .await
    }
}

/// Prepares and runs an export batch in one call.
pub async fn export_bulk<'r, S, F>(
    selected: &[S],
    lookup: F,
    variant: ExportVariant,
    resolver: &dyn DownloadResolver,
    retriever: &dyn FileRetriever,
) -> Result<ExportSummary, BulkError>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<&'r Row>,
{
    let batch = ExportBatch::prepare(selected, lookup, variant)?;
    Ok(batch.execute(resolver, retriever).await)
}

/// Suggested download name: `{variant}_{id}` plus the extension of `path`.
pub fn export_filename(variant: ExportVariant, id: &str, path: &str) -> String {
    let last_segment = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .rsplit('/')
        .next()
        .unwrap_or_default();

    match Path::new(last_segment).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}_{}.{}", variant, id, ext),
        _ => format!("{}_{}", variant, id),
    }
}

/// Resolves paths from the row itself, reading the variant's path field.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFieldResolver;

#[async_trait]
impl DownloadResolver for RowFieldResolver {
    async fn resolve_download_target(
        &self,
        row: &Row,
        variant: ExportVariant,
    ) -> Result<Option<String>, BackendError> {
        Ok(row
            .get(variant.path_field())
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockDownloadResolver, MockFileRetriever};
    use serde_json::json;

    fn find<'r>(rows: &'r [Row]) -> impl Fn(&str) -> Option<&'r Row> {
        move |id| rows.iter().find(|r| r.id() == id)
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename(ExportVariant::Stl, "A1", "files/A1/model.stl"),
            "stl_A1.stl"
        );
        assert_eq!(
            export_filename(ExportVariant::Finished, "7", "https://cdn/x/final.tar.gz?sig=1"),
            "finished_7.gz"
        );
        assert_eq!(
            export_filename(ExportVariant::Original, "A1", "files/A1/upload"),
            "original_A1"
        );
        assert_eq!(
            export_filename(ExportVariant::Original, "A1", "files/v1.2/upload"),
            "original_A1"
        );
    }

    #[test]
    fn test_prepare_empty_selection() {
        let rows: Vec<Row> = vec![];
        let selected: Vec<&str> = vec![];
        let err = ExportBatch::prepare(&selected, find(&rows), ExportVariant::Stl).unwrap_err();
        assert!(matches!(err, BulkError::EmptySelection));
    }

    #[tokio::test]
    async fn test_row_field_resolver() {
        let row = Row::new(
            "A1",
            [
                ("stl_path", json!("files/a.stl")),
                ("finished_path", json!("  ")),
            ],
        );
        let resolver = RowFieldResolver;
        assert_eq!(
            resolver
                .resolve_download_target(&row, ExportVariant::Stl)
                .await
                .unwrap()
                .as_deref(),
            Some("files/a.stl")
        );
        assert!(resolver
            .resolve_download_target(&row, ExportVariant::Finished)
            .await
            .unwrap()
            .is_none());
        assert!(resolver
            .resolve_download_target(&row, ExportVariant::Original)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_missing_rows_paths_and_errors() {
        let rows = vec![
            fixtures::order_with_files("A", "Completed", &[(ExportVariant::Stl, "a.stl")]),
            fixtures::order("B", "Completed"),
            fixtures::order("C", "Completed"),
        ];
        let resolver = MockDownloadResolver::new();
        resolver.set_path("A", ExportVariant::Stl, "files/a.stl").await;
        resolver.set_path("B", ExportVariant::Stl, "").await;
        resolver
            .set_error("C", BackendError::Status { status: 500, message: "down".into() })
            .await;
        let retriever = MockFileRetriever::new();

        let summary = export_bulk(
            &["A", "B", "C", "Z"],
            find(&rows),
            ExportVariant::Stl,
            &resolver,
            &retriever,
        )
        .await
        .unwrap();

        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.missing, vec!["B", "C", "Z"]);
        assert!(!summary.is_complete());

        let retrieved = retriever.recorded_retrievals().await;
        assert_eq!(retrieved.len(), 1);
        assert_eq!(retrieved[0].path, "files/a.stl");
        assert_eq!(retrieved[0].filename, "stl_A.stl");
    }

    #[test]
    fn test_summary_message() {
        let summary = ExportSummary {
            batch_id: Uuid::new_v4(),
            variant: ExportVariant::Stl,
            downloaded: 2,
            missing: vec!["C".into()],
        };
        assert_eq!(
            summary.message(),
            "2 file(s) downloaded. 1 file(s) could not be found: C."
        );
    }
}
