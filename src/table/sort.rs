//! In-memory ordering of result rows

use serde_json::Value;
use std::cmp::Ordering;
use crate::query::{Row, SortDirection};

/// Three-way comparison on raw field values
///
/// Numbers compare numerically, strings lexically, booleans false < true.
/// Missing values, nulls and mismatched types compare equal, so they keep
/// their relative position.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Sort rows by one field, keeping input order among equal keys
pub fn stable_sort<'a>(items: &'a [Row], key: &str, direction: SortDirection) -> Vec<&'a Row> {
    let mut sorted: Vec<&Row> = items.iter().collect();
    // slice::sort_by is stable
    sorted.sort_by(|a, b| match direction {
        SortDirection::Asc => compare_values(a.get(key), b.get(key)),
        SortDirection::Desc => compare_values(b.get(key), a.get(key)),
    });
    sorted
}
