//! Field ordering of the single-record detail view

use serde_json::Value;
use std::cmp::Ordering;
use crate::metadata::AttributeDefinition;
use crate::query::Row;

fn detail_order(a: &AttributeDefinition, b: &AttributeDefinition) -> Ordering {
    match (a.display_order, b.display_order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.display_name.cmp(&b.display_name),
    }
}

/// Attributes with a non-null value in `item`, paired with that value
///
/// Ordered by `display_order`; attributes without one come last, sorted by
/// display name.
pub fn detail_fields<'a>(
    item: &'a Row,
    attributes: &'a [AttributeDefinition],
) -> Vec<(&'a AttributeDefinition, &'a Value)> {
    let mut fields: Vec<(&AttributeDefinition, &Value)> = attributes
        .iter()
        .filter_map(|attr| match item.get(&attr.name) {
            Some(Value::Null) | None => None,
            Some(value) => Some((attr, value)),
        })
        .collect();
    fields.sort_by(|(a, _), (b, _)| detail_order(a, b));
    fields
}
