//! Bulk redesign: classify the selection, submit eligible orders one by one,
//! and aggregate the outcomes into a report.

use std::time::Instant;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::backend::StateChangeSubmitter;
use crate::metrics;
use crate::table::Row;

use super::error::BulkError;
use super::report::RedesignReport;
use super::types::{
    BulkOutcome, Classification, IdOutcome, REJECTED_REASON, SERVER_ERROR_REASON,
};

#[derive(Debug, Clone)]
struct BatchEntry {
    id: String,
    classification: Classification,
}

/// A validated redesign batch, ready to submit.
///
/// Eligibility is a snapshot taken when the batch is prepared. The batch owns
/// everything it needs, so callers can release any lock on the session before
/// awaiting [`RedesignBatch::execute`].
#[derive(Debug, Clone)]
pub struct RedesignBatch {
    batch_id: Uuid,
    message: String,
    entries: Vec<BatchEntry>,
}

impl RedesignBatch {
    /// Validates and classifies a selection.
    ///
    /// Checks run in order: non-empty selection, at least one eligible order,
    /// non-empty message. The message is trimmed.
    pub fn prepare<'r, S, F>(selected: &[S], lookup: F, message: &str) -> Result<Self, BulkError>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<&'r Row>,
    {
        if selected.is_empty() {
            return Err(BulkError::EmptySelection);
        }

        let batch_id = Uuid::new_v4();
        let entries: Vec<BatchEntry> = selected
            .iter()
            .map(|id| {
                let id = id.as_ref();
                BatchEntry {
                    id: id.to_string(),
                    classification: Classification::of(lookup(id)),
                }
            })
            .collect();

        if !entries.iter().any(|e| e.classification.is_eligible()) {
            let outcomes = entries
                .iter()
                .filter_map(|e| {
                    e.classification
                        .skipped_outcome()
                        .map(|outcome| IdOutcome::new(e.id.clone(), outcome))
                })
                .collect();
            let report = RedesignReport::new(batch_id, outcomes);
            info!(%batch_id, report = %report, "No eligible orders in redesign selection");
            return Err(BulkError::NothingEligible(Box::new(report)));
        }

        let message = message.trim();
        if message.is_empty() {
            return Err(BulkError::EmptyMessage);
        }

        Ok(Self {
            batch_id,
            message: message.to_string(),
            entries,
        })
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    /// The trimmed message sent with every request.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Selected ids in submission order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn eligible_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.classification.is_eligible())
            .count()
    }

    /// Submits every eligible order sequentially and builds the report.
    ///
    /// Never fails: collaborator errors and rejections are recorded per id.
    pub async fn execute(self, submitter: &dyn StateChangeSubmitter) -> RedesignReport {
        let span = info_span!(
            "redesign_batch",
            batch_id = %self.batch_id,
            selected = self.entries.len(),
            eligible = self.eligible_count()
        );

        async move {
            let started = Instant::now();
            let mut outcomes = Vec::with_capacity(self.entries.len());

            for entry in &self.entries {
                let outcome = match entry.classification.skipped_outcome() {
                    Some(skipped) => skipped,
                    None => submit_one(submitter, &entry.id, &self.message).await,
                };
                debug!(id = %entry.id, outcome = outcome.label(), "Redesign outcome");
                metrics::BULK_OUTCOMES
                    .with_label_values(&[outcome.label()])
                    .inc();
                outcomes.push(IdOutcome::new(entry.id.clone(), outcome));
            }

            let report = RedesignReport::new(self.batch_id, outcomes);
            metrics::BULK_BATCHES
                .with_label_values(&[report.kind.as_str()])
                .inc();
            metrics::BULK_BATCH_DURATION
                .with_label_values(&["redesign"])
                .observe(started.elapsed().as_secs_f64());

            info!(
                kind = report.kind.as_str(),
                succeeded = report.succeeded_count(),
                failed = report.failed_count(),
                "Redesign batch complete"
            );
            report
        }
        .instrument(span)
        .await
    }
}

async fn submit_one(submitter: &dyn StateChangeSubmitter, id: &str, message: &str) -> BulkOutcome {
    match submitter.submit_state_change(id, message).await {
        Ok(response) if response.is_success() => BulkOutcome::Succeeded,
        Ok(response) => {
            let reason = if response.message.trim().is_empty() {
                REJECTED_REASON.to_string()
            } else {
                response.message
            };
            warn!(id, status = %response.status, reason = %reason, "Redesign request rejected");
            BulkOutcome::Failed(reason)
        }
        Err(e) => {
            warn!(id, error = %e, retryable = e.is_retryable(), "Redesign request failed");
            BulkOutcome::Failed(SERVER_ERROR_REASON.to_string())
        }
    }
}

/// Prepares and runs a redesign batch in one call.
pub async fn submit_bulk<'r, S, F>(
    selected: &[S],
    lookup: F,
    message: &str,
    submitter: &dyn StateChangeSubmitter,
) -> Result<RedesignReport, BulkError>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<&'r Row>,
{
    let batch = RedesignBatch::prepare(selected, lookup, message)?;
    Ok(batch.execute(submitter).await)
}
