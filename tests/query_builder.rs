//! Integration tests for query building
//!
//! Filter/sort state from the explorer becomes the data API payload.

mod common;

use arronax::builder::{build_main_query, primary_key_query, with_csv_output, with_limit};
use arronax::query::{OutputType, QueryOperator};
use arronax::{Filter, FilterOperator, SortKey};
use serde_json::json;

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_kind_filter_with_timestamp_sort() {
    let filters = vec![Filter::new("kind", FilterOperator::Eq, vec![json!("transaction")])];
    let sort = vec![SortKey::desc("timestamp")];

    let query = build_main_query(&fields(&["timestamp", "kind"]), &filters, &sort);

    assert_eq!(query.fields, fields(&["timestamp", "kind"]));
    assert_eq!(query.predicates.len(), 1);
    let predicate = &query.predicates[0];
    assert_eq!(predicate.field, "kind");
    assert_eq!(predicate.operation, QueryOperator::Eq);
    assert_eq!(predicate.set, vec![json!("transaction")]);
    assert!(!predicate.inverse);
    assert_eq!(query.order_by.len(), 1);
    assert_eq!(query.order_by[0].field, "timestamp");
    assert_eq!(query.order_by[0].direction.to_string(), "desc");
}

#[test]
fn test_in_filter_needs_more_than_one_value() {
    let single = vec![Filter::new("kind", FilterOperator::In, vec![json!("transaction")])];
    assert!(build_main_query(&[], &single, &vec![]).predicates.is_empty());

    let pair = vec![Filter::new(
        "kind",
        FilterOperator::In,
        vec![json!("transaction"), json!("origination")],
    )];
    let query = build_main_query(&[], &pair, &vec![]);
    assert_eq!(query.predicates[0].operation, QueryOperator::In);
    assert_eq!(query.predicates[0].set.len(), 2);
}

#[test]
fn test_incomplete_filters_are_omitted() {
    let filters = vec![
        Filter::new("baker", FilterOperator::Eq, vec![]),
        Filter::new("baker", FilterOperator::StartsWith, vec![json!("")]),
        Filter::new("level", FilterOperator::Between, vec![json!(10)]),
        Filter::new("delegate_value", FilterOperator::IsNull, vec![]),
        Filter::new("manager", FilterOperator::IsNotNull, vec![]),
    ];
    let query = build_main_query(&[], &filters, &vec![]);

    let kept: Vec<(&str, bool)> = query
        .predicates
        .iter()
        .map(|p| (p.field.as_str(), p.inverse))
        .collect();
    assert_eq!(kept, vec![("delegate_value", false), ("manager", true)]);
    assert!(query.predicates.iter().all(|p| p.operation == QueryOperator::IsNull));
}

#[test]
fn test_negative_operators_become_inverted_predicates() {
    let cases = [
        (FilterOperator::NotEq, QueryOperator::Eq),
        (FilterOperator::NotStartsWith, QueryOperator::StartsWith),
        (FilterOperator::NotEndsWith, QueryOperator::EndsWith),
        (FilterOperator::NotIn, QueryOperator::In),
        (FilterOperator::IsNotNull, QueryOperator::IsNull),
    ];
    for (operator, expected) in cases {
        let filter = Filter::new("account_id", operator, vec![json!("kt1"), json!("tz1")]);
        let query = build_main_query(&[], &[filter], &vec![]);
        assert_eq!(query.predicates[0].operation, expected, "{}", operator);
        assert!(query.predicates[0].inverse, "{}", operator);
    }
}

#[test]
fn test_sort_keys_keep_their_order() {
    let sort = vec![SortKey::desc("timestamp"), SortKey::asc("kind")];
    let query = build_main_query(&[], &[], &sort);
    let order: Vec<String> = query
        .order_by
        .iter()
        .map(|o| format!("{} {}", o.field, o.direction))
        .collect();
    assert_eq!(order, vec!["timestamp desc", "kind asc"]);
}

#[test]
fn test_export_and_lookup_helpers() {
    let query = with_csv_output(with_limit(build_main_query(&fields(&["level"]), &[], &vec![]), 5000));
    assert_eq!(query.output, OutputType::Csv);
    assert_eq!(query.limit, 5000);

    let lookup = primary_key_query("level", json!(900001), &vec![SortKey::desc("level")]);
    assert!(lookup.fields.is_empty());
    assert_eq!(lookup.limit, 1);
    assert_eq!(lookup.predicates[0].operation, QueryOperator::Eq);
    assert_eq!(lookup.predicates[0].set, vec![json!(900001)]);
    assert_eq!(lookup.order_by[0].field, "level");
}

#[test]
fn test_payload_json_shape() {
    let filters = vec![Filter::new("account_id", FilterOperator::NotStartsWith, vec![json!("kt1")])];
    let query = build_main_query(&fields(&["account_id"]), &filters, &vec![SortKey::desc("balance")]);
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(
        json,
        json!({
            "fields": ["account_id"],
            "predicates": [{"field": "account_id", "operation": "startsWith", "set": ["kt1"], "inverse": true}],
            "orderBy": [{"field": "balance", "direction": "desc"}],
            "limit": 100,
            "output": "json"
        })
    );
}
