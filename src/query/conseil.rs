//! Query payload understood by the data API
//!
//! The same JSON shape is what a shareable link carries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use crate::metadata::Aggregation;

/// Row limit of a blank query
pub const BLANK_QUERY_LIMIT: u32 = 100;

/// One result record, keyed by attribute name
pub type Row = serde_json::Map<String, Value>;

/// Operators native to the data API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryOperator {
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "before")]
    Before,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "after")]
    After,
    #[serde(rename = "startsWith")]
    StartsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "isnull")]
    IsNull,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction '{}', expected asc or desc", s)),
        }
    }
}

/// Result encoding requested from the data API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Json,
    Csv,
}

impl Default for OutputType {
    fn default() -> Self {
        OutputType::Json
    }
}

/// One filter condition of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub operation: QueryOperator,
    #[serde(default)]
    pub set: Vec<Value>,
    #[serde(default)]
    pub inverse: bool,
}

/// One ordering clause of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub field: String,
    pub direction: SortDirection,
}

/// Aggregation applied to a projected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationClause {
    pub field: String,
    pub function: Aggregation,
}

fn blank_limit() -> u32 {
    BLANK_QUERY_LIMIT
}

/// A complete request for the data endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
    #[serde(default)]
    pub order_by: Vec<Ordering>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregation: Vec<AggregationClause>,
    #[serde(default = "blank_limit")]
    pub limit: u32,
    #[serde(default)]
    pub output: OutputType,
}

impl Default for Query {
    fn default() -> Self {
        Self::blank()
    }
}

impl Query {
    /// An empty query: every field, no predicates, no ordering
    pub fn blank() -> Self {
        Self {
            fields: Vec::new(),
            predicates: Vec::new(),
            order_by: Vec::new(),
            aggregation: Vec::new(),
            limit: BLANK_QUERY_LIMIT,
            output: OutputType::Json,
        }
    }

    pub fn add_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn add_predicate(
        mut self,
        field: impl Into<String>,
        operation: QueryOperator,
        set: Vec<Value>,
        inverse: bool,
    ) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            operation,
            set,
            inverse,
        });
        self
    }

    pub fn add_ordering(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(Ordering {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn add_aggregation(mut self, field: impl Into<String>, function: Aggregation) -> Self {
        self.aggregation.push(AggregationClause {
            field: field.into(),
            function,
        });
        self
    }

    pub fn set_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn set_output(mut self, output: OutputType) -> Self {
        self.output = output;
        self
    }

    /// Aggregation applied to a field, if any
    pub fn aggregation_for(&self, field: &str) -> Option<Aggregation> {
        self.aggregation.iter().find(|a| a.field == field).map(|a| a.function)
    }
}
