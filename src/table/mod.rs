//! Table presentation (verb module)
//!
//! Sorting, paging and formatting of result rows for display.
//!
//! - `sort` - stable in-memory ordering
//! - `page` - pagination with blank-row padding, plus sort/page state
//! - `format` - number, hash and datetime formatting
//! - `render` - per-data-type cell rendering
//! - `detail` - field order of the single-record view

mod detail;
mod format;
mod page;
mod render;
mod sort;

pub use detail::detail_fields;
pub use format::{
    capitalize, format_number, group_thousands, identicon_colors, moment_to_strftime,
    numeric_value, title_case, truncate_hash, value_text, DateFormatter, UtcDateFormatter,
    LONG_STRING_LIMIT,
};
pub use page::{page_count, paginate, Page, TableState, DEFAULT_ROWS_PER_PAGE};
pub use render::{reference_link, render_cell, render_row, Cell, Link, RenderOptions};
pub use sort::{compare_values, stable_sort};
