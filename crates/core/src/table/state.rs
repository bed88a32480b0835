//! Owned table controls with the reset and clamping rules applied.

use serde::Serialize;

use super::engine::{visible_page, VisiblePage};
use super::error::TableError;
use super::filter::FilterState;
use super::model::{Column, Row};
use super::pagination::PaginationState;
use super::sort::SortState;

/// Default number of rows on one page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 50;

/// Filter, sort and pagination state of one table instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableState {
    filter: FilterState,
    sort: SortState,
    pagination: PaginationState,
    #[serde(skip)]
    default_rows_per_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            sort: SortState::none(),
            pagination: PaginationState {
                current_page: 1,
                rows_per_page: DEFAULT_ROWS_PER_PAGE,
            },
            default_rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl TableState {
    pub fn new(default_rows_per_page: usize) -> Result<Self, TableError> {
        Ok(Self {
            pagination: PaginationState::new(default_rows_per_page)?,
            default_rows_per_page,
            ..Self::default()
        })
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Replaces the search query and goes back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.pagination.current_page = 1;
    }

    /// Changes the page size and goes back to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), TableError> {
        self.pagination = PaginationState::new(rows_per_page)?;
        Ok(())
    }

    /// Header click on `key`; keeps the current page.
    pub fn click_sort(&mut self, key: &str) -> &SortState {
        self.sort = self.sort.clicked(key);
        &self.sort
    }

    /// Jumps to `page`. Pages past the end are pulled back on the next render.
    pub fn set_page(&mut self, page: usize) -> Result<(), TableError> {
        if page == 0 {
            return Err(TableError::InvalidPage(page));
        }
        self.pagination.current_page = page;
        Ok(())
    }

    /// Restores `1 <= current_page <= total_pages`.
    pub fn clamp_page(&mut self, total_pages: usize) -> bool {
        self.pagination.clamp(total_pages)
    }

    /// Back to an empty query, no sort, first page, default page size.
    pub fn reset(&mut self) {
        self.filter = FilterState::default();
        self.sort = SortState::none();
        self.pagination = PaginationState {
            current_page: 1,
            rows_per_page: self.default_rows_per_page,
        };
    }

    /// Renders the current page, clamping the page number first if the
    /// result set shrank underneath it.
    pub fn visible_page<'a>(&mut self, rows: &'a [Row], columns: &[Column]) -> VisiblePage<'a> {
        let page = visible_page(rows, columns, &self.filter, &self.sort, &self.pagination);
        if self.clamp_page(page.total_pages) {
            tracing::debug!(
                page = self.pagination.current_page,
                total_pages = page.total_pages,
                "clamped current page"
            );
            return visible_page(rows, columns, &self.filter, &self.sort, &self.pagination);
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| {
                let name = if i % 2 == 0 { "even" } else { "odd" };
                Row::new(format!("{i}"), [("seq", json!(i)), ("name", json!(name))])
            })
            .collect()
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("Seq", "seq"), Column::new("Name", "name")]
    }

    #[test]
    fn test_query_change_resets_page() {
        let mut state = TableState::new(10).unwrap();
        state.set_page(3).unwrap();
        state.set_query("odd");
        assert_eq!(state.pagination().current_page, 1);
    }

    #[test]
    fn test_rows_per_page_change_resets_page() {
        let mut state = TableState::new(10).unwrap();
        state.set_page(3).unwrap();
        state.set_rows_per_page(25).unwrap();
        assert_eq!(state.pagination().current_page, 1);
        assert_eq!(state.pagination().rows_per_page, 25);
        assert!(state.set_rows_per_page(0).is_err());
        assert_eq!(state.pagination().rows_per_page, 25);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut state = TableState::new(10).unwrap();
        state.set_page(2).unwrap();
        state.click_sort("seq");
        assert_eq!(state.pagination().current_page, 2);
    }

    #[test]
    fn test_three_clicks_clear_sort() {
        let mut state = TableState::default();
        state.click_sort("seq");
        state.click_sort("seq");
        let sort = state.click_sort("seq");
        assert!(!sort.is_active());
    }

    #[test]
    fn test_set_page_zero_rejected() {
        let mut state = TableState::default();
        assert_eq!(state.set_page(0), Err(TableError::InvalidPage(0)));
    }

    #[test]
    fn test_render_clamps_page_after_data_shrinks() {
        let rows_full = rows(100);
        let mut state = TableState::new(10).unwrap();
        state.set_page(10).unwrap();
        let page = state.visible_page(&rows_full, &columns());
        assert_eq!(page.rows.len(), 10);

        let rows_small = rows(25);
        let page = state.visible_page(&rows_small, &columns());
        assert_eq!(state.pagination().current_page, 3);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0].id(), "20");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = TableState::new(25).unwrap();
        state.set_query("x");
        state.click_sort("seq");
        state.set_rows_per_page(100).unwrap();
        state.set_page(4).unwrap();

        state.reset();

        assert!(state.filter().is_empty());
        assert!(!state.sort().is_active());
        assert_eq!(state.pagination().current_page, 1);
        assert_eq!(state.pagination().rows_per_page, 25);
    }
}
