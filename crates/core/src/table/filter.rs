//! Free-text filtering across every displayed column.

use serde::{Deserialize, Serialize};

use super::model::{Column, Row};

/// The current search box contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
}

impl FilterState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// An empty query keeps every row.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Whether any column of `row` contains the query, ignoring case.
    pub fn matches(&self, row: &Row, columns: &[Column]) -> bool {
        if self.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        row_matches(row, columns, &needle)
    }
}

fn row_matches(row: &Row, columns: &[Column], needle: &str) -> bool {
    columns
        .iter()
        .any(|col| row.cell_text(&col.accessor).to_lowercase().contains(needle))
}

/// Keeps the rows matching `filter`, preserving input order.
pub fn filter_rows<'a>(rows: &'a [Row], columns: &[Column], filter: &FilterState) -> Vec<&'a Row> {
    if filter.is_empty() {
        return rows.iter().collect();
    }

    let needle = filter.query.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(row, columns, &needle))
        .collect()
}
