//! Filter, sort and paginate in one pass.

use serde::Serialize;

use super::filter::{filter_rows, FilterState};
use super::model::{Column, Row};
use super::pagination::{page_slice, total_pages, PaginationState};
use super::sort::{sort_rows, SortState};

/// The rows to render plus the counts the pager needs.
#[derive(Debug, Clone, Serialize)]
pub struct VisiblePage<'a> {
    pub rows: Vec<&'a Row>,
    /// Rows surviving the filter, across all pages.
    pub total_count: usize,
    pub total_pages: usize,
}

impl VisiblePage<'_> {
    /// Identities of the rows on this page, in display order.
    pub fn ids(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.id().to_string()).collect()
    }
}

/// Derives the visible page from raw rows and the user's controls.
///
/// Pure: the input rows are never reordered. A `current_page` beyond the
/// reported `total_pages` yields an empty page; clamping is the caller's job.
pub fn visible_page<'a>(
    rows: &'a [Row],
    columns: &[Column],
    filter: &FilterState,
    sort: &SortState,
    pagination: &PaginationState,
) -> VisiblePage<'a> {
    let filtered = filter_rows(rows, columns, filter);
    let sorted = sort_rows(filtered, sort);
    let total_count = sorted.len();

    VisiblePage {
        rows: page_slice(&sorted, pagination).to_vec(),
        total_count,
        total_pages: total_pages(total_count, pagination.rows_per_page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered_rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| Row::new(format!("{i}"), [("seq", json!(i))]))
            .collect()
    }

    fn seq_columns() -> Vec<Column> {
        vec![Column::new("Seq", "seq")]
    }

    #[test]
    fn test_empty_rows_give_one_empty_page() {
        let page = visible_page(
            &[],
            &seq_columns(),
            &FilterState::default(),
            &SortState::none(),
            &PaginationState::new(50).unwrap(),
        );
        assert!(page.rows.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_second_page_of_120_rows() {
        let rows = numbered_rows(120);
        let mut pagination = PaginationState::new(50).unwrap();
        pagination.current_page = 2;

        let page = visible_page(
            &rows,
            &seq_columns(),
            &FilterState::default(),
            &SortState::none(),
            &pagination,
        );

        assert_eq!(page.total_count, 120);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), 50);
        assert_eq!(page.rows.first().unwrap().id(), "50");
        assert_eq!(page.rows.last().unwrap().id(), "99");
    }

    #[test]
    fn test_pagination_applies_after_sort() {
        let rows = numbered_rows(30);
        let pagination = PaginationState::new(10).unwrap();

        let page = visible_page(
            &rows,
            &seq_columns(),
            &FilterState::default(),
            &SortState::descending("seq"),
            &pagination,
        );

        assert_eq!(page.ids()[0], "29");
        assert_eq!(page.ids()[9], "20");
    }

    #[test]
    fn test_input_order_is_not_mutated() {
        let rows = numbered_rows(5);
        let _ = visible_page(
            &rows,
            &seq_columns(),
            &FilterState::default(),
            &SortState::descending("seq"),
            &PaginationState::new(5).unwrap(),
        );
        let ids: Vec<&str> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_page_beyond_total_is_reported_not_corrected() {
        let rows = numbered_rows(5);
        let mut pagination = PaginationState::new(2).unwrap();
        pagination.current_page = 9;

        let page = visible_page(
            &rows,
            &seq_columns(),
            &FilterState::default(),
            &SortState::none(),
            &pagination,
        );

        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 3);
    }
}
