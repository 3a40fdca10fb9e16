//! Query types (nouns)
//!
//! - `filter` - filter/sort state edited in the explorer
//! - `conseil` - the payload sent to the data API
//! - `defaults` - canned per-entity queries

mod conseil;
mod defaults;
mod filter;

pub use conseil::{
    AggregationClause, Ordering, OutputType, Predicate, Query, QueryOperator, Row,
    SortDirection, BLANK_QUERY_LIMIT,
};
pub use defaults::{default_query, ROW_LIMIT, TIMESTAMP_CUTOFF};
pub use filter::{Filter, FilterOperator, ParseOperatorError, Sort, SortKey};
