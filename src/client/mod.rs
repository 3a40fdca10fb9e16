//! Query API client (verb module)
//!
//! `ConseilApi` is the seam between the explorer session and the remote
//! indexer; `HttpApi` is the reqwest implementation.

mod api;
mod error;
mod http;

pub use api::ConseilApi;
pub use error::ClientError;
pub use http::{data_url, metadata_url, HttpApi, API_KEY_HEADER};
