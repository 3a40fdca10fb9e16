//! Pagination with blank-row padding

use crate::query::{Row, SortDirection};
use super::sort::stable_sort;

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// One visible page of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Real rows on this page
    pub rows: Vec<T>,
    /// Blank rows appended to keep a uniform page height
    pub padding: usize,
    pub page: usize,
    pub page_size: usize,
    /// Item count across all pages
    pub total: usize,
}

impl<T> Page<T> {
    /// Rows followed by `padding` blanks
    pub fn padded(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.rows
            .iter()
            .map(Some)
            .chain(std::iter::repeat(None).take(self.padding))
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Slice `[page * page_size, page * page_size + page_size)` and pad to `page_size`
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    let rows = items[start..end].to_vec();
    let padding = page_size - rows.len();

    Page {
        rows,
        padding,
        page,
        page_size,
        total: items.len(),
    }
}

/// Sort and page state of a results table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub page: usize,
    pub rows_per_page: usize,
    pub order: SortDirection,
    pub order_by: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            order: SortDirection::Asc,
            order_by: "level".to_string(),
        }
    }
}

impl TableState {
    /// Header click: a new column sorts descending, the same column flips
    pub fn request_sort(&mut self, property: &str) {
        let order = if self.order_by == property {
            self.order.toggled()
        } else {
            SortDirection::Desc
        };
        self.order = order;
        self.order_by = property.to_string();
    }

    pub fn change_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn change_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page;
    }

    /// The sorted, padded page currently on screen
    pub fn visible_page<'a>(&self, items: &'a [Row]) -> Page<&'a Row> {
        let sorted = stable_sort(items, &self.order_by, self.order);
        paginate(&sorted, self.page, self.rows_per_page)
    }
}
