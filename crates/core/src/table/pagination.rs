//! Page arithmetic.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::TableError;

/// Current page and page size. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub current_page: usize,
    pub rows_per_page: usize,
}

impl PaginationState {
    /// First page of `rows_per_page` rows.
    pub fn new(rows_per_page: usize) -> Result<Self, TableError> {
        if rows_per_page == 0 {
            return Err(TableError::InvalidRowsPerPage(rows_per_page));
        }
        Ok(Self {
            current_page: 1,
            rows_per_page,
        })
    }

    /// Index range of the current page within `len` items.
    ///
    /// A page past the end yields an empty range rather than panicking.
    pub fn range(&self, len: usize) -> Range<usize> {
        let page = self.current_page.max(1);
        let start = (page - 1).saturating_mul(self.rows_per_page).min(len);
        let end = start.saturating_add(self.rows_per_page).min(len);
        start..end
    }

    /// Pulls `current_page` back into `1..=total_pages`.
    ///
    /// Returns true when the page changed.
    pub fn clamp(&mut self, total_pages: usize) -> bool {
        let clamped = self.current_page.clamp(1, total_pages.max(1));
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }
}

/// `max(1, ceil(count / rows_per_page))`.
pub fn total_pages(count: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    count.div_ceil(rows_per_page).max(1)
}

/// The slice of `items` shown on the current page.
pub fn page_slice<'s, T>(items: &'s [T], pagination: &PaginationState) -> &'s [T] {
    &items[pagination.range(items.len())]
}
