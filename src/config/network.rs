//! Network connection settings

use serde::{Deserialize, Serialize};
use crate::metadata::Entity;

/// One network the explorer can browse
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network name used in API paths, e.g. `mainnet`
    pub network: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    /// Preferred tab order; entities not listed follow in API order
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl NetworkConfig {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.network)
    }

    /// Connection details handed to the API client
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            url: self.url.trim_end_matches('/').to_string(),
            api_key: self.api_key.clone(),
            network: self.network.clone(),
        }
    }
}

/// Where and how to reach the query API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub network: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_trims_url() {
        let network: NetworkConfig = serde_yaml::from_str(
            "network: carthagenet\nurl: https://conseil.example.com/\napiKey: abc\nentities: [blocks, rolls]\n",
        )
        .unwrap();
        let info = network.server_info();
        assert_eq!(info.url, "https://conseil.example.com");
        assert_eq!(info.api_key, "abc");
        assert_eq!(network.entities, vec![Entity::Blocks, Entity::Rolls]);
        assert_eq!(network.display_name(), "carthagenet");
    }
}
