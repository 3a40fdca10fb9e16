//! Queryable ledger entities

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A queryable ledger record type
///
/// The explorer knows a handful of entities up front (they carry canned
/// default queries and primary keys); anything else the API reports is kept
/// as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Blocks,
    Operations,
    Accounts,
    Rolls,
    Fees,
    BalanceUpdates,
    Ballots,
    OperationGroups,
    Other(String),
}

impl Entity {
    pub fn as_str(&self) -> &str {
        match self {
            Entity::Blocks => "blocks",
            Entity::Operations => "operations",
            Entity::Accounts => "accounts",
            Entity::Rolls => "rolls",
            Entity::Fees => "fees",
            Entity::BalanceUpdates => "balance_updates",
            Entity::Ballots => "ballots",
            Entity::OperationGroups => "operation_groups",
            Entity::Other(name) => name,
        }
    }

    /// Attributes that render as a link to the record itself
    pub fn primary_keys(&self) -> &'static [&'static str] {
        match self {
            Entity::Blocks => &["hash", "level"],
            Entity::Accounts => &["account_id"],
            Entity::Operations => &["operation_group_hash"],
            _ => &[],
        }
    }

    pub fn is_primary_key(&self, attribute: &str) -> bool {
        self.primary_keys().contains(&attribute)
    }
}

impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        match s {
            "blocks" => Entity::Blocks,
            "operations" => Entity::Operations,
            "accounts" => Entity::Accounts,
            "rolls" => Entity::Rolls,
            "fees" => Entity::Fees,
            "balance_updates" => Entity::BalanceUpdates,
            "ballots" => Entity::Ballots,
            "operation_groups" => Entity::OperationGroups,
            other => Entity::Other(other.to_string()),
        }
    }
}

impl FromStr for Entity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Entity::from(s))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Entity::from(s.as_str()))
    }
}

impl Serialize for Entity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Entity metadata as reported by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    pub name: Entity,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub display_name_plural: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl EntityDefinition {
    pub fn new(name: impl Into<Entity>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            display_name_plural: None,
            count: 0,
        }
    }

    /// Fill a missing or blank plural name from the singular one
    pub fn normalize(mut self) -> Self {
        let blank = self.display_name_plural.as_deref().map_or(true, str::is_empty);
        if blank {
            self.display_name_plural = Some(self.display_name.clone());
        }
        self
    }

    pub fn plural_name(&self) -> &str {
        self.display_name_plural.as_deref().unwrap_or(&self.display_name)
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity::from(s.as_str())
    }
}

/// Order entities the way a network config lists them
///
/// Entities named in `preferred` come first, in that order; `rolls` is
/// dropped when listed. Entities the config does not mention follow in API
/// order.
pub fn order_entities(entities: Vec<EntityDefinition>, preferred: &[Entity]) -> Vec<EntityDefinition> {
    if preferred.is_empty() {
        return entities;
    }

    let mut ordered = Vec::with_capacity(entities.len());
    for name in preferred {
        if *name == Entity::Rolls {
            continue;
        }
        if let Some(found) = entities.iter().find(|e| &e.name == name) {
            ordered.push(found.clone());
        }
    }
    for entity in entities {
        if !preferred.contains(&entity.name) {
            ordered.push(entity);
        }
    }
    ordered
}
