//! Attribute definitions as reported by the metadata API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use super::types::{DataType, OperatorType};

/// Below this many distinct values a filter offers an enumerated value list
pub const CARDINALITY_NUMBER: u64 = 50;

/// Below this many distinct values a string is shown title-cased and
/// an integer is shown without grouping
pub const DISPLAY_CARDINALITY: u64 = 20;

/// Pointer from an attribute to the entity/key it identifies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeReference {
    pub entity: String,
    pub key: String,
}

/// Whether an attribute identifies a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    UniqueKey,
    NonKey,
}

impl Default for KeyType {
    fn default() -> Self {
        KeyType::NonKey
    }
}

/// A typed, named field of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub entity: String,
    pub data_type: DataType,
    /// Count of distinct values, when the indexer knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<u64>,
    #[serde(default)]
    pub key_type: KeyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<AttributeReference>,
    /// Raw value → human label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<HashMap<String, String>>,
    /// Datetime display pattern (moment-style tokens)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<String>,
    /// Declared decimal precision; stored values are scaled by 10^scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol_code: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl AttributeDefinition {
    pub fn new(entity: impl Into<String>, name: impl Into<String>, data_type: DataType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            entity: entity.into(),
            data_type,
            cardinality: None,
            key_type: KeyType::NonKey,
            display_order: None,
            reference: None,
            value_map: None,
            data_format: None,
            scale: None,
            currency_symbol: None,
            currency_symbol_code: None,
            visible: true,
        }
    }

    pub fn with_cardinality(mut self, cardinality: u64) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_reference(mut self, entity: impl Into<String>, key: impl Into<String>) -> Self {
        self.reference = Some(AttributeReference {
            entity: entity.into(),
            key: key.into(),
        });
        self
    }

    pub fn with_display_order(mut self, order: i64) -> Self {
        self.display_order = Some(order);
        self
    }

    /// True when a filter on this attribute should offer an enumerated value list
    pub fn is_low_cardinality(&self) -> bool {
        matches!(self.cardinality, Some(c) if c < CARDINALITY_NUMBER)
    }

    /// True when values are few enough to be displayed as labels
    pub fn is_display_enumerable(&self) -> bool {
        matches!(self.cardinality, Some(c) if c > 0 && c < DISPLAY_CARDINALITY)
    }

    pub fn operator_type(&self) -> OperatorType {
        self.data_type.operator_type()
    }
}

/// Look up an attribute by name
pub fn find_attribute<'a>(attributes: &'a [AttributeDefinition], name: &str) -> Option<&'a AttributeDefinition> {
    attributes.iter().find(|a| a.name == name)
}

/// Names of the given attributes, in order
pub fn attribute_names(attributes: &[AttributeDefinition]) -> Vec<String> {
    attributes.iter().map(|a| a.name.clone()).collect()
}
