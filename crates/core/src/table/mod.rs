//! Generic tabular data engine backing the listing pages.
//!
//! Rows are materialized client-side; everything here is a pure, synchronous
//! computation over them:
//!
//! - Filtering: case-insensitive substring match across every column
//! - Sorting: numeric when both values are numbers, dictionary order otherwise,
//!   missing values always last
//! - Pagination: fixed-size pages with clamping when the result set shrinks
//! - Selection: a cross-page set of row ids with a page-scoped select-all
//!
//! # Example
//!
//! ```ignore
//! use orderdesk_core::table::{orders_columns, TableState};
//!
//! let columns = orders_columns();
//! let mut state = TableState::new(50)?;
//! state.set_query("abc");
//! state.click_sort("created_at");
//!
//! let page = state.visible_page(&rows, &columns);
//! println!("{} of {} rows, page 1/{}", page.rows.len(), page.total_count, page.total_pages);
//! ```

mod engine;
mod error;
mod filter;
mod model;
mod pagination;
mod selection;
mod sort;
mod state;

pub use engine::{visible_page, VisiblePage};
pub use error::{RowError, TableError};
pub use filter::{filter_rows, FilterState};
pub use model::{
    is_missing, orders_columns, validate_columns, value_text, Column, Row, ID_FIELD, STATUS_FIELD,
};
pub use pagination::{page_slice, total_pages, PaginationState};
pub use selection::SelectionSet;
pub use sort::{as_number, collate, compare_values, sort_rows, SortDirection, SortState};
pub use state::{TableState, DEFAULT_ROWS_PER_PAGE};
