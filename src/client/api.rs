//! The query API seam

use async_trait::async_trait;
use serde_json::Value;
use crate::config::ServerInfo;
use crate::metadata::{AttributeDefinition, Entity, EntityDefinition};
use crate::query::{Query, Row};
use super::error::ClientError;

/// Metadata and data endpoints of a Conseil-style indexer
///
/// The network comes from `server`; `platform` from the explorer config.
#[async_trait]
pub trait ConseilApi: Send + Sync {
    /// Entities the network exposes
    async fn entities(&self, server: &ServerInfo, platform: &str) -> Result<Vec<EntityDefinition>, ClientError>;

    /// Attribute definitions of one entity
    async fn attributes(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
    ) -> Result<Vec<AttributeDefinition>, ClientError>;

    /// Distinct values of a (low-cardinality) attribute
    async fn attribute_values(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        attribute: &str,
    ) -> Result<Vec<Value>, ClientError>;

    /// Run a query and return its rows
    async fn execute_entity_query(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        query: &Query,
    ) -> Result<Vec<Row>, ClientError>;

    /// Run a query with `output = csv` and return the raw text
    async fn execute_csv_query(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        query: &Query,
    ) -> Result<String, ClientError>;
}
