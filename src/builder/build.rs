use serde_json::Value;
use crate::query::{Filter, OutputType, Query, QueryOperator, Sort};

/// Build the query for the current explorer state
///
/// Projects `fields`, turns every complete filter into a predicate and
/// applies the sort keys in order. A filter is incomplete when it is
/// multi-valued (`between`, `in`, `notin`) with exactly one value, or when
/// it is not a null check and has no usable value.
pub fn build_main_query(fields: &[String], filters: &[Filter], sort: &Sort) -> Query {
    let mut query = Query::blank().add_fields(fields.iter().cloned());

    for filter in filters.iter().filter(|f| is_complete(f)) {
        let (operation, inverse) = filter.operator.to_query_operator();
        query = query.add_predicate(&filter.name, operation, filter.values.clone(), inverse);
    }

    apply_sort(query, sort)
}

/// Whether a filter contributes a predicate
pub fn is_complete(filter: &Filter) -> bool {
    if filter.operator.is_multi_valued() && filter.values.len() == 1 {
        return false;
    }
    filter.operator.is_null_check() || !filter.has_blank_values()
}

/// Append the sort keys as orderings, in sequence
pub fn apply_sort(mut query: Query, sort: &Sort) -> Query {
    for key in sort {
        query = query.add_ordering(&key.order_by, key.order);
    }
    query
}

/// Query for every field with an ordering and a row cap
pub fn all_fields_query(fields: &[String], sort: &Sort, limit: u32) -> Query {
    apply_sort(Query::blank().add_fields(fields.iter().cloned()), sort).set_limit(limit)
}

/// Query for the single record whose `key` equals `value`
pub fn primary_key_query(key: &str, value: Value, sort: &Sort) -> Query {
    let query = Query::blank().add_predicate(key, QueryOperator::Eq, vec![value], false);
    apply_sort(query, sort).set_limit(1)
}

/// Main query capped at `limit` rows
pub fn with_limit(query: Query, limit: u32) -> Query {
    query.set_limit(limit)
}

/// Main query with results requested as CSV
pub fn with_csv_output(query: Query) -> Query {
    query.set_output(OutputType::Csv)
}
