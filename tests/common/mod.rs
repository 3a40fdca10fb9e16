//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use arronax::metadata::{AttributeDefinition, Entity, EntityDefinition};
use arronax::{parser, ClientError, ConseilApi, ExplorerConfig, Query, Row, ServerInfo};
use serde::Deserialize;
use serde_json::Value;

/// Load a config fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> ExplorerConfig {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Canned API responses for one network
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkData {
    pub entities: Vec<EntityDefinition>,
    pub attributes: HashMap<Entity, Vec<AttributeDefinition>>,
    pub rows: HashMap<Entity, Vec<Row>>,
    #[serde(default)]
    pub values: HashMap<Entity, HashMap<String, Vec<Value>>>,
}

/// Load canned API responses from tests/test_data
pub fn load_network_data(name: &str) -> NetworkData {
    let path = format!("tests/test_data/{}", name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test data {}: {}", name, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid test data {}: {}", name, e))
}

/// Attribute definitions of one entity from the canned responses
pub fn attributes_of(entity: &Entity) -> Vec<AttributeDefinition> {
    load_network_data("mainnet.json")
        .attributes
        .remove(entity)
        .unwrap_or_default()
}

/// A request the mock API received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Entities { network: String },
    Attributes { network: String, entity: Entity },
    Values { entity: Entity, attribute: String },
    Query { network: String, entity: Entity, query: Query },
    Csv { entity: Entity, query: Query },
}

/// In-memory `ConseilApi` serving `NetworkData` and recording every call
pub struct MockApi {
    pub data: NetworkData,
    pub csv: String,
    /// Make every data query fail with this HTTP status
    pub fail_queries: Option<u16>,
    /// Make every distinct-value lookup fail with this HTTP status
    pub fail_values: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new(data: NetworkData) -> Self {
        Self {
            data,
            csv: "level,hash\n900002,BLockHashC\n".to_string(),
            fail_queries: None,
            fail_values: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(load_network_data("mainnet.json"))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Data queries received, in order
    pub fn queries(&self) -> Vec<(Entity, Query)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Query { entity, query, .. } => Some((entity, query)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(&self, server: &ServerInfo) -> Option<ClientError> {
        status_error(server, self.fail_queries)
    }
}

fn status_error(server: &ServerInfo, status: Option<u16>) -> Option<ClientError> {
    status.map(|status| ClientError::Status {
        url: server.url.clone(),
        status,
        body: "unavailable".to_string(),
    })
}

/// Rows matching every non-inverted `eq` predicate, capped at the query limit
fn matching_rows(rows: &[Row], query: &Query) -> Vec<Row> {
    rows.iter()
        .filter(|row| {
            query
                .predicates
                .iter()
                .filter(|p| p.operation == arronax::query::QueryOperator::Eq && !p.inverse)
                .all(|p| p.set.first().map_or(true, |v| row.get(&p.field) == Some(v)))
        })
        .take(query.limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ConseilApi for MockApi {
    async fn entities(&self, server: &ServerInfo, _platform: &str) -> Result<Vec<EntityDefinition>, ClientError> {
        self.record(Call::Entities { network: server.network.clone() });
        Ok(self.data.entities.clone())
    }

    async fn attributes(
        &self,
        server: &ServerInfo,
        _platform: &str,
        entity: &Entity,
    ) -> Result<Vec<AttributeDefinition>, ClientError> {
        self.record(Call::Attributes {
            network: server.network.clone(),
            entity: entity.clone(),
        });
        Ok(self.data.attributes.get(entity).cloned().unwrap_or_default())
    }

    async fn attribute_values(
        &self,
        server: &ServerInfo,
        _platform: &str,
        entity: &Entity,
        attribute: &str,
    ) -> Result<Vec<Value>, ClientError> {
        self.record(Call::Values {
            entity: entity.clone(),
            attribute: attribute.to_string(),
        });
        if let Some(err) = status_error(server, self.fail_values) {
            return Err(err);
        }
        Ok(self
            .data
            .values
            .get(entity)
            .and_then(|v| v.get(attribute))
            .cloned()
            .unwrap_or_default())
    }

    async fn execute_entity_query(
        &self,
        server: &ServerInfo,
        _platform: &str,
        entity: &Entity,
        query: &Query,
    ) -> Result<Vec<Row>, ClientError> {
        self.record(Call::Query {
            network: server.network.clone(),
            entity: entity.clone(),
            query: query.clone(),
        });
        if let Some(err) = self.failure(server) {
            return Err(err);
        }
        let rows = self.data.rows.get(entity).map(Vec::as_slice).unwrap_or(&[]);
        Ok(matching_rows(rows, query))
    }

    async fn execute_csv_query(
        &self,
        server: &ServerInfo,
        _platform: &str,
        entity: &Entity,
        query: &Query,
    ) -> Result<String, ClientError> {
        self.record(Call::Csv {
            entity: entity.clone(),
            query: query.clone(),
        });
        if let Some(err) = self.failure(server) {
            return Err(err);
        }
        Ok(self.csv.clone())
    }
}
