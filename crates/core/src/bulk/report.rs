//! Human-readable report of a redesign batch.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::types::{BulkOutcome, IdOutcome, ReportKind};

/// Heading placed above per-order failures.
pub const FAILED_REQUESTS_HEADING: &str = "Failed Requests:";

/// Aggregated result of a redesign batch.
#[derive(Debug, Clone, Serialize)]
pub struct RedesignReport {
    pub batch_id: Uuid,
    pub kind: ReportKind,
    /// One entry per selected id, in selection order.
    pub outcomes: Vec<IdOutcome>,
    /// Rendered report, one line per entry.
    pub lines: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl RedesignReport {
    pub fn new(batch_id: Uuid, outcomes: Vec<IdOutcome>) -> Self {
        let (lines, kind) = render(&outcomes);
        Self {
            batch_id,
            kind,
            outcomes,
            lines,
            completed_at: Utc::now(),
        }
    }

    /// Lines joined by newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn succeeded_count(&self) -> usize {
        self.count(|o| matches!(o, BulkOutcome::Succeeded))
    }

    /// Failed and not-found ids.
    pub fn failed_count(&self) -> usize {
        self.count(|o| o.failure_reason().is_some())
    }

    pub fn outcome_of(&self, id: &str) -> Option<&BulkOutcome> {
        self.outcomes
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.outcome)
    }

    fn count(&self, pred: impl Fn(&BulkOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|entry| pred(&entry.outcome)).count()
    }
}

impl fmt::Display for RedesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Renders report lines and picks the report kind.
///
/// New orders and orders already in redesign short-circuit the report when
/// they account for everything that is left; otherwise every category gets
/// its own lines in a fixed order.
pub fn render(outcomes: &[IdOutcome]) -> (Vec<String>, ReportKind) {
    let mut lines = Vec::new();

    let new_ids = ids_where(outcomes, |o| matches!(o, BulkOutcome::IneligibleNew));
    if !outcomes.is_empty() && new_ids.len() == outcomes.len() {
        lines.push(all_new_line(&new_ids));
        return (lines, ReportKind::Info);
    }
    for id in &new_ids {
        lines.push(format!(
            "Order {id} cannot be sent for redesign because it is a new order."
        ));
    }

    let remaining = outcomes.len() - new_ids.len();
    let already_ids = ids_where(outcomes, |o| matches!(o, BulkOutcome::AlreadyInTargetState));
    if remaining > 0 && already_ids.len() == remaining {
        lines.push(all_already_line(&already_ids));
        return (lines, ReportKind::Info);
    }
    for id in &already_ids {
        lines.push(format!("Order {id} is already in the redesign process."));
    }

    let succeeded = outcomes
        .iter()
        .filter(|entry| matches!(entry.outcome, BulkOutcome::Succeeded))
        .count();
    match succeeded {
        0 => {}
        1 => lines.push("1 order was sent for redesign successfully.".to_string()),
        n => lines.push(format!("{n} orders were sent for redesign successfully.")),
    }

    let failures: Vec<(&str, &str)> = outcomes
        .iter()
        .filter_map(|entry| {
            entry
                .outcome
                .failure_reason()
                .map(|reason| (entry.id.as_str(), reason))
        })
        .collect();
    if !failures.is_empty() {
        lines.push(FAILED_REQUESTS_HEADING.to_string());
        for (id, reason) in &failures {
            lines.push(format!("Order {id}: {reason}"));
        }
    }

    let kind = match (succeeded, failures.len()) {
        (0, 0) => ReportKind::Info,
        (_, 0) => ReportKind::Success,
        (0, _) => ReportKind::Failure,
        _ => ReportKind::Partial,
    };

    (lines, kind)
}

fn ids_where<'a>(outcomes: &'a [IdOutcome], pred: impl Fn(&BulkOutcome) -> bool) -> Vec<&'a str> {
    outcomes
        .iter()
        .filter(|entry| pred(&entry.outcome))
        .map(|entry| entry.id.as_str())
        .collect()
}

fn all_new_line(ids: &[&str]) -> String {
    if let [id] = ids {
        format!("Order {id} cannot be redesigned because it is a new order.")
    } else {
        format!(
            "Orders {} cannot be redesigned because they are new orders.",
            ids.join(", ")
        )
    }
}

fn all_already_line(ids: &[&str]) -> String {
    if let [id] = ids {
        format!("Order {id} is already in the redesign process.")
    } else {
        format!("Orders {} are already in the redesign process.", ids.join(", "))
    }
}
