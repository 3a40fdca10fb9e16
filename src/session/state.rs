//! Per-entity and user-visible session state

use serde_json::Value;
use std::collections::HashMap;
use crate::metadata::AttributeDefinition;
use crate::query::{Filter, Row, Sort};
use crate::table::TableState;
use super::error::{ErrorKind, SessionError};

/// Everything the explorer shows for one entity tab
#[derive(Debug, Clone, Default)]
pub struct EntityState {
    /// Rows of the last executed query
    pub items: Vec<Row>,
    pub columns: Vec<AttributeDefinition>,
    pub sort: Sort,
    pub filters: Vec<Filter>,
    /// Distinct values per low-cardinality attribute
    pub available_values: HashMap<String, Vec<Value>>,
    /// Filters applied by the last submitted query
    pub filter_count: usize,
    pub table: TableState,
}

impl EntityState {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn values_for(&self, attribute: &str) -> &[Value] {
        self.available_values.get(attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Point the table's in-memory ordering at the first sort key
    pub fn sync_table_order(&mut self) {
        if let Some(first) = self.sort.first() {
            self.table.order_by = first.order_by.clone();
            self.table.order = first.order;
        }
    }
}

/// A user-visible notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: ErrorKind,
}

impl From<&SessionError> for Message {
    fn from(err: &SessionError) -> Self {
        Message {
            text: err.to_string(),
            kind: err.kind(),
        }
    }
}
