//! Canned queries used before any filter state exists for an entity

use serde_json::json;
use crate::metadata::Entity;
use super::conseil::{Query, QueryOperator, SortDirection};

/// Row cap for explorer queries
pub const ROW_LIMIT: u32 = 5000;

/// Default lower bound on `timestamp` (2019-05-01T04:00:00Z, epoch millis)
pub const TIMESTAMP_CUTOFF: i64 = 1_556_683_200_000;

/// The canned default query for an entity, if it has one
pub fn default_query(entity: &Entity) -> Option<Query> {
    let base = Query::blank().set_limit(ROW_LIMIT);
    let after_cutoff = |q: Query| q.add_predicate("timestamp", QueryOperator::After, vec![json!(TIMESTAMP_CUTOFF)], false);

    let query = match entity {
        Entity::Blocks => after_cutoff(
            base.add_fields(["level", "timestamp", "hash", "baker", "meta_cycle"]),
        )
        .add_ordering("level", SortDirection::Desc),

        Entity::Operations => after_cutoff(
            base.add_fields([
                "timestamp", "block_level", "source", "destination", "amount", "kind", "fee",
                "operation_group_hash",
            ])
            .add_predicate("kind", QueryOperator::Eq, vec![json!("transaction")], false),
        )
        .add_ordering("timestamp", SortDirection::Desc),

        Entity::Accounts => base
            .add_fields(["account_id", "manager", "delegate_value", "balance"])
            .add_predicate("account_id", QueryOperator::StartsWith, vec![json!("kt1")], true)
            .add_predicate("balance", QueryOperator::Gt, vec![json!(0)], false)
            .add_ordering("block_level", SortDirection::Desc),

        Entity::Rolls => base
            .add_ordering("block_level", SortDirection::Desc)
            .add_ordering("rolls", SortDirection::Desc),

        Entity::Fees => after_cutoff(
            base.add_fields(["kind", "timestamp", "high", "medium", "low"])
                .add_predicate("kind", QueryOperator::In, vec![json!("transaction"), json!("origination")], false),
        )
        .add_ordering("timestamp", SortDirection::Desc)
        .add_ordering("kind", SortDirection::Asc),

        Entity::BalanceUpdates | Entity::Ballots | Entity::OperationGroups => after_cutoff(base),

        Entity::Other(_) => return None,
    };

    Some(query)
}
