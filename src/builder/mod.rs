//! Query builder (verb module)
//!
//! Explorer filter/sort/projection state → data API query. Pure functions.

mod build;

pub use build::{
    all_fields_query, apply_sort, build_main_query, is_complete, primary_key_query,
    with_csv_output, with_limit,
};
