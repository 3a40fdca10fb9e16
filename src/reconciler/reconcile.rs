use std::collections::HashMap;
use tracing::{debug, warn};
use crate::builder::all_fields_query;
use crate::metadata::{attribute_names, find_attribute, AttributeDefinition, Entity};
use crate::query::{default_query, Filter, FilterOperator, Predicate, Query, Sort, SortKey, ROW_LIMIT};
use crate::share::SharedLink;
use super::error::ReconcileError;

/// Where an entity's starting query came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuerySource {
    /// Decoded from a shared link
    Shared,
    /// Canned default (or its config override)
    Default,
    /// No default: every attribute, newest first
    Fallback,
}

/// Initial explorer state for an entity
#[derive(Debug, Clone)]
pub struct InitialView {
    pub columns: Vec<AttributeDefinition>,
    pub sort: Sort,
    pub filters: Vec<Filter>,
    /// Query to run for the first page of items
    pub query: Query,
    /// Attributes whose distinct values feed an enumerated filter
    pub cardinality_lookups: Vec<String>,
    pub source: QuerySource,
}

/// Decide the initial {columns, sort, filters} for an entity
///
/// A shared link for this same entity wins over the canned default, and is
/// used verbatim (its ordering, even when empty). `overrides` replaces
/// canned defaults per entity.
pub fn reconcile_entity(
    entity: &Entity,
    attributes: &[AttributeDefinition],
    shared: Option<&SharedLink>,
    overrides: &HashMap<Entity, Query>,
) -> Result<InitialView, ReconcileError> {
    // 1. Pick the starting query
    let starting = match shared {
        Some(link) if &link.entity == entity && !link.query.is_empty() => {
            Some((link.decode()?, QuerySource::Shared))
        }
        _ => overrides
            .get(entity)
            .cloned()
            .or_else(|| default_query(entity))
            .map(|q| (q, QuerySource::Default)),
    };

    let Some((query, source)) = starting else {
        return fallback_view(entity, attributes);
    };
    debug!(entity = %entity, ?source, predicates = query.predicates.len(), "Reconciling entity query");

    // 2. Columns: named fields in attribute order, or everything
    let columns: Vec<AttributeDefinition> = if query.fields.is_empty() {
        attributes.to_vec()
    } else {
        attributes
            .iter()
            .filter(|a| query.fields.contains(&a.name))
            .cloned()
            .collect()
    };

    // 3. Sort straight from the ordering list
    let sort: Sort = query
        .order_by
        .iter()
        .map(|o| SortKey::new(&o.field, o.direction))
        .collect();

    // 4. Filters from predicates
    let mut cardinality_lookups = Vec::new();
    let filters = query
        .predicates
        .iter()
        .map(|p| {
            let filter = predicate_to_filter(entity, attributes, p)?;
            if filter.is_low_cardinality && !cardinality_lookups.contains(&filter.name) {
                cardinality_lookups.push(filter.name.clone());
            }
            Ok(filter)
        })
        .collect::<Result<Vec<_>, ReconcileError>>()?;

    Ok(InitialView {
        columns,
        sort,
        filters,
        query,
        cardinality_lookups,
        source,
    })
}

/// Turn a predicate back into the filter that would have produced it
fn predicate_to_filter(
    entity: &Entity,
    attributes: &[AttributeDefinition],
    predicate: &Predicate,
) -> Result<Filter, ReconcileError> {
    let attribute = find_attribute(attributes, &predicate.field).ok_or_else(|| {
        ReconcileError::UnknownAttribute {
            entity: entity.to_string(),
            attribute: predicate.field.clone(),
        }
    })?;

    let operator = FilterOperator::from_query_operator(predicate.operation, predicate.inverse)
        .unwrap_or_else(|| {
            warn!(
                entity = %entity,
                field = %predicate.field,
                operation = ?predicate.operation,
                "Inverted predicate has no negative filter operator, keeping base operator"
            );
            FilterOperator::from_query_operator(predicate.operation, false)
                .unwrap_or(FilterOperator::Eq)
        });

    Ok(Filter {
        name: predicate.field.clone(),
        operator,
        values: predicate.set.clone(),
        operator_type: attribute.operator_type(),
        is_low_cardinality: attribute.is_low_cardinality(),
    })
}

/// Every attribute as a column, sorted descending by level
fn fallback_view(entity: &Entity, attributes: &[AttributeDefinition]) -> Result<InitialView, ReconcileError> {
    let level = attributes
        .iter()
        .find(|a| a.name == "level" || a.name == "block_level")
        .or_else(|| attributes.first())
        .ok_or_else(|| ReconcileError::NoAttributes(entity.to_string()))?;

    let sort = vec![SortKey::desc(&level.name)];
    let query = all_fields_query(&attribute_names(attributes), &sort, ROW_LIMIT);
    debug!(entity = %entity, order_by = %level.name, "No default query, using all attributes");

    Ok(InitialView {
        columns: attributes.to_vec(),
        sort,
        filters: Vec::new(),
        query,
        cardinality_lookups: Vec::new(),
        source: QuerySource::Fallback,
    })
}
