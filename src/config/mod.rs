//! Explorer configuration (nouns)
//!
//! Platform, networks with their API endpoints, and per-entity query
//! overrides. Loaded from YAML by `parser`.

mod network;

pub use network::{NetworkConfig, ServerInfo};

use chrono::Duration;
use serde::Deserialize;
use std::collections::HashMap;
use crate::error::ParseError;
use crate::metadata::Entity;
use crate::query::{Query, ROW_LIMIT};

/// Attribute metadata is refetched after this many hours
pub const DEFAULT_ATTRIBUTE_CACHE_HOURS: i64 = 120;

fn default_row_limit() -> u32 {
    ROW_LIMIT
}

fn default_cache_hours() -> i64 {
    DEFAULT_ATTRIBUTE_CACHE_HOURS
}

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerConfig {
    /// Ledger platform queried through the API, e.g. `tezos`
    pub platform: String,
    pub default_network: String,
    #[serde(default = "default_row_limit")]
    pub row_limit: u32,
    #[serde(default = "default_cache_hours")]
    pub attribute_cache_hours: i64,
    pub networks: Vec<NetworkConfig>,
    /// Replaces the canned default query of an entity
    #[serde(default)]
    pub default_queries: HashMap<Entity, Query>,
}

impl ExplorerConfig {
    /// Get a network by name
    pub fn get_network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.network == name)
    }

    pub fn default_network(&self) -> Option<&NetworkConfig> {
        self.get_network(&self.default_network)
    }

    /// Attribute cache lifetime; hours beyond chrono's range saturate
    pub fn attribute_cache_ttl(&self) -> Duration {
        Duration::try_hours(self.attribute_cache_hours).unwrap_or(Duration::MAX)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.platform.trim().is_empty() {
            return Err(ParseError::Invalid("platform must not be empty".to_string()));
        }
        if self.networks.is_empty() {
            return Err(ParseError::Invalid("at least one network is required".to_string()));
        }
        for (i, network) in self.networks.iter().enumerate() {
            if self.networks[..i].iter().any(|n| n.network == network.network) {
                return Err(ParseError::Invalid(format!(
                    "network '{}' is defined more than once",
                    network.network
                )));
            }
            if network.url.trim().is_empty() {
                return Err(ParseError::Invalid(format!(
                    "network '{}' has no url",
                    network.network
                )));
            }
        }
        if self.default_network().is_none() {
            return Err(ParseError::Invalid(format!(
                "defaultNetwork '{}' is not among the configured networks",
                self.default_network
            )));
        }
        if self.attribute_cache_hours < 0 {
            return Err(ParseError::Invalid("attributeCacheHours must not be negative".to_string()));
        }
        if Duration::try_hours(self.attribute_cache_hours).is_none() {
            return Err(ParseError::Invalid(format!(
                "attributeCacheHours {} is out of range",
                self.attribute_cache_hours
            )));
        }
        Ok(())
    }
}
