//! Shareable links (verb module)
//!
//! A link carries the entity and the base64url-encoded JSON query:
//! `<origin>?e=<entity>&q=<query>`.

mod error;

pub use error::ShareError;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use reqwest::Url;
use crate::metadata::Entity;
use crate::query::Query;

/// URL-safe alphabet, unpadded on encode, padding optional on decode
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Entity and encoded query extracted from a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    pub entity: Entity,
    /// Still-encoded `q` parameter
    pub query: String,
}

impl SharedLink {
    pub fn decode(&self) -> Result<Query, ShareError> {
        decode_query(&self.query)
    }
}

/// Encode a query as the `q` parameter
pub fn encode_query(query: &Query) -> Result<String, ShareError> {
    let json = serde_json::to_string(query)?;
    Ok(URL_SAFE_LENIENT.encode(json.as_bytes()))
}

/// Decode a `q` parameter back into a query
pub fn decode_query(param: &str) -> Result<Query, ShareError> {
    let bytes = URL_SAFE_LENIENT.decode(param.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Build the shareable link for an entity's query
pub fn share_link(origin: &str, entity: &Entity, query: &Query) -> Result<String, ShareError> {
    let encoded = encode_query(query)?;
    Ok(format!("{}?e={}&q={}", origin.trim_end_matches('/'), entity, encoded))
}

/// Pull `e` and `q` out of a full link or a bare `?e=..&q=..` string
pub fn parse_link(link: &str) -> Result<SharedLink, ShareError> {
    let url = Url::parse(link)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(link)))
        .map_err(|e| ShareError::InvalidLink(format!("{}: {}", link, e)))?;

    let mut entity = None;
    let mut query = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "e" => entity = Some(Entity::from(value.as_ref())),
            "q" => query = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(SharedLink {
        entity: entity.ok_or(ShareError::MissingParameter("e"))?,
        query: query.ok_or(ShareError::MissingParameter("q"))?,
    })
}
