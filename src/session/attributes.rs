//! Time-limited attribute metadata cache

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use crate::metadata::{AttributeDefinition, Entity};

/// Attribute definitions of every entity of one network
#[derive(Debug, Clone, Default)]
pub struct AttributeCache {
    network: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    attributes: HashMap<Entity, Vec<AttributeDefinition>>,
}

impl AttributeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the cache holds `network`'s metadata fetched within `ttl`
    pub fn is_fresh(&self, network: &str, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (&self.network, self.fetched_at) {
            (Some(cached), Some(at)) => cached == network && now - at <= ttl,
            _ => false,
        }
    }

    pub fn store(
        &mut self,
        network: &str,
        now: DateTime<Utc>,
        attributes: HashMap<Entity, Vec<AttributeDefinition>>,
    ) {
        self.network = Some(network.to_string());
        self.fetched_at = Some(now);
        self.attributes = attributes;
    }

    /// Attributes of an entity, empty when unknown
    pub fn get(&self, entity: &Entity) -> &[AttributeDefinition] {
        self.attributes.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn invalidate(&mut self) {
        self.network = None;
        self.fetched_at = None;
        self.attributes.clear();
    }
}
