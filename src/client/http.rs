//! reqwest implementation of the query API

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use crate::config::ServerInfo;
use crate::metadata::{AttributeDefinition, Entity, EntityDefinition};
use crate::query::{OutputType, Query, Row};
use super::api::ConseilApi;
use super::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "apiKey";

/// URL of a metadata endpoint: `{url}/v2/metadata/{platform}/{network}/{path...}`
pub fn metadata_url(server: &ServerInfo, platform: &str, path: &[&str]) -> String {
    let mut url = format!("{}/v2/metadata/{}/{}", server.url, platform, server.network);
    for segment in path {
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// URL of the data endpoint of an entity
pub fn data_url(server: &ServerInfo, platform: &str, entity: &Entity) -> String {
    format!("{}/v2/data/{}/{}/{}", server.url, platform, server.network, entity)
}

/// HTTP client for a Conseil-style API
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            warn!(url = %url, status = %status, "Request failed with non-success status");
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, server: &ServerInfo, url: String) -> Result<T, ClientError> {
        debug!(url = %url, "GET");
        let request = self.client.get(&url).header(API_KEY_HEADER, &server.api_key);
        let body = self.send(&url, request).await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { url, source })
    }

    async fn post_query(&self, server: &ServerInfo, url: &str, query: &Query) -> Result<String, ClientError> {
        debug!(
            url = %url,
            fields = query.fields.len(),
            predicates = query.predicates.len(),
            limit = query.limit,
            "POST query"
        );
        let request = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &server.api_key)
            .json(query);
        self.send(url, request).await
    }
}

#[async_trait]
impl ConseilApi for HttpApi {
    async fn entities(&self, server: &ServerInfo, platform: &str) -> Result<Vec<EntityDefinition>, ClientError> {
        self.get_json(server, metadata_url(server, platform, &["entities"])).await
    }

    async fn attributes(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
    ) -> Result<Vec<AttributeDefinition>, ClientError> {
        let url = metadata_url(server, platform, &[entity.as_str(), "attributes"]);
        self.get_json(server, url).await
    }

    async fn attribute_values(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        attribute: &str,
    ) -> Result<Vec<Value>, ClientError> {
        let url = metadata_url(server, platform, &[entity.as_str(), attribute]);
        self.get_json(server, url).await
    }

    async fn execute_entity_query(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        query: &Query,
    ) -> Result<Vec<Row>, ClientError> {
        let url = data_url(server, platform, entity);
        let body = self.post_query(server, &url, query).await?;
        let rows: Vec<Row> =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode { url: url.clone(), source })?;
        debug!(url = %url, rows = rows.len(), "Query returned");
        Ok(rows)
    }

    async fn execute_csv_query(
        &self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        query: &Query,
    ) -> Result<String, ClientError> {
        let url = data_url(server, platform, entity);
        let query = query.clone().set_output(OutputType::Csv);
        self.post_query(server, &url, &query).await
    }
}
