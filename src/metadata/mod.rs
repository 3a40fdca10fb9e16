//! Entity and attribute metadata (nouns)
//!
//! These types mirror what the metadata API reports about each entity.

mod attribute;
mod entity;
mod types;

pub use attribute::{
    attribute_names, find_attribute, AttributeDefinition, AttributeReference, KeyType,
    CARDINALITY_NUMBER, DISPLAY_CARDINALITY,
};
pub use entity::{order_entities, Entity, EntityDefinition};
pub use types::{Aggregation, DataType, OperatorType, ParseAggregationError, ParseDataTypeError};
