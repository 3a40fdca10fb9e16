//! Filter and sort state as edited in the explorer

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use crate::metadata::OperatorType;
use super::conseil::{QueryOperator, SortDirection};

/// Operators a filter can be set to
///
/// The negative variants have no counterpart in the data API; the query
/// builder turns them into their positive base operator with `inverse` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "noteq")]
    NotEq,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notin")]
    NotIn,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "notstartWith")]
    NotStartsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "notendWith")]
    NotEndsWith,
    #[serde(rename = "isnull")]
    IsNull,
    #[serde(rename = "isnotnull")]
    IsNotNull,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "before")]
    Before,
    #[serde(rename = "after")]
    After,
    #[serde(rename = "like")]
    Like,
}

impl FilterOperator {
    /// The data API operator and inverse flag this operator maps to
    pub fn to_query_operator(self) -> (QueryOperator, bool) {
        match self {
            FilterOperator::Eq => (QueryOperator::Eq, false),
            FilterOperator::NotEq => (QueryOperator::Eq, true),
            FilterOperator::In => (QueryOperator::In, false),
            FilterOperator::NotIn => (QueryOperator::In, true),
            FilterOperator::StartsWith => (QueryOperator::StartsWith, false),
            FilterOperator::NotStartsWith => (QueryOperator::StartsWith, true),
            FilterOperator::EndsWith => (QueryOperator::EndsWith, false),
            FilterOperator::NotEndsWith => (QueryOperator::EndsWith, true),
            FilterOperator::IsNull => (QueryOperator::IsNull, false),
            FilterOperator::IsNotNull => (QueryOperator::IsNull, true),
            FilterOperator::Between => (QueryOperator::Between, false),
            FilterOperator::Lt => (QueryOperator::Lt, false),
            FilterOperator::Gt => (QueryOperator::Gt, false),
            FilterOperator::Before => (QueryOperator::Before, false),
            FilterOperator::After => (QueryOperator::After, false),
            FilterOperator::Like => (QueryOperator::Like, false),
        }
    }

    /// Rebuild the filter operator from a predicate
    ///
    /// Returns `None` when the predicate is inverted but the operator has no
    /// negative filter variant.
    pub fn from_query_operator(operator: QueryOperator, inverse: bool) -> Option<Self> {
        let positive = match operator {
            QueryOperator::Eq => FilterOperator::Eq,
            QueryOperator::In => FilterOperator::In,
            QueryOperator::StartsWith => FilterOperator::StartsWith,
            QueryOperator::EndsWith => FilterOperator::EndsWith,
            QueryOperator::IsNull => FilterOperator::IsNull,
            QueryOperator::Between => FilterOperator::Between,
            QueryOperator::Lt => FilterOperator::Lt,
            QueryOperator::Gt => FilterOperator::Gt,
            QueryOperator::Before => FilterOperator::Before,
            QueryOperator::After => FilterOperator::After,
            QueryOperator::Like => FilterOperator::Like,
        };
        if !inverse {
            return Some(positive);
        }
        match positive {
            FilterOperator::Eq => Some(FilterOperator::NotEq),
            FilterOperator::In => Some(FilterOperator::NotIn),
            FilterOperator::StartsWith => Some(FilterOperator::NotStartsWith),
            FilterOperator::EndsWith => Some(FilterOperator::NotEndsWith),
            FilterOperator::IsNull => Some(FilterOperator::IsNotNull),
            _ => None,
        }
    }

    pub fn is_null_check(self) -> bool {
        matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }

    /// Operators that need at least two operands to mean anything
    pub fn is_multi_valued(self) -> bool {
        matches!(self, FilterOperator::Between | FilterOperator::In | FilterOperator::NotIn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::NotEq => "noteq",
            FilterOperator::In => "in",
            FilterOperator::NotIn => "notin",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::NotStartsWith => "notstartWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::NotEndsWith => "notendWith",
            FilterOperator::IsNull => "isnull",
            FilterOperator::IsNotNull => "isnotnull",
            FilterOperator::Between => "between",
            FilterOperator::Lt => "lt",
            FilterOperator::Gt => "gt",
            FilterOperator::Before => "before",
            FilterOperator::After => "after",
            FilterOperator::Like => "like",
        }
    }

    /// Operators offered for a filter widget family
    pub fn for_operator_type(operator_type: OperatorType) -> &'static [FilterOperator] {
        use FilterOperator::*;
        match operator_type {
            OperatorType::Numeric => &[Eq, NotEq, In, NotIn, Lt, Gt, Between, IsNull, IsNotNull],
            OperatorType::DateTime => &[Eq, NotEq, Before, After, Between, IsNull, IsNotNull],
            OperatorType::Boolean => &[Eq, NotEq, IsNull, IsNotNull],
            OperatorType::String => &[
                Eq, NotEq, In, NotIn, StartsWith, NotStartsWith, EndsWith, NotEndsWith, Like,
                IsNull, IsNotNull,
            ],
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a filter operator string
#[derive(Debug, Clone)]
pub struct ParseOperatorError {
    pub input: String,
}

impl fmt::Display for ParseOperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown filter operator '{}'", self.input)
    }
}

impl std::error::Error for ParseOperatorError {}

impl FromStr for FilterOperator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let all = [
            FilterOperator::Eq, FilterOperator::NotEq, FilterOperator::In, FilterOperator::NotIn,
            FilterOperator::StartsWith, FilterOperator::NotStartsWith, FilterOperator::EndsWith,
            FilterOperator::NotEndsWith, FilterOperator::IsNull, FilterOperator::IsNotNull,
            FilterOperator::Between, FilterOperator::Lt, FilterOperator::Gt,
            FilterOperator::Before, FilterOperator::After, FilterOperator::Like,
        ];
        all.into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOperatorError { input: s.to_string() })
    }
}

/// One filter condition as edited in the filter panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Attribute name
    pub name: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub values: Vec<Value>,
    #[serde(default)]
    pub operator_type: OperatorType,
    #[serde(default)]
    pub is_low_cardinality: bool,
}

impl Filter {
    pub fn new(name: impl Into<String>, operator: FilterOperator, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            operator,
            values,
            operator_type: OperatorType::default(),
            is_low_cardinality: false,
        }
    }

    /// True when there is no usable operand (no values, or the first one is blank)
    pub fn has_blank_values(&self) -> bool {
        self.values.first().map_or(true, is_blank)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// One ordering key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    pub order_by: String,
    pub order: SortDirection,
}

impl SortKey {
    pub fn new(order_by: impl Into<String>, order: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            order,
        }
    }

    pub fn desc(order_by: impl Into<String>) -> Self {
        Self::new(order_by, SortDirection::Desc)
    }

    pub fn asc(order_by: impl Into<String>) -> Self {
        Self::new(order_by, SortDirection::Asc)
    }
}

/// Ordered list of sort keys, applied in sequence
pub type Sort = Vec<SortKey>;
