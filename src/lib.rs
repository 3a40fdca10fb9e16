//! arronax - Query core of a ledger explorer for Conseil-style indexers
//!
//! This library provides:
//! - Entity and attribute metadata types
//! - Explorer configuration parsing from YAML
//! - Filter/sort state → data API query building
//! - Default and shared-link query reconciliation
//! - Table presentation (stable sort, padded pages, cell formatting)
//! - An async explorer session over a pluggable API client
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `metadata/` - entities, attributes, data types
//! - `query/` - filters, sorts, the wire query, canned defaults
//! - `config/` - platform, networks, query overrides
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → ExplorerConfig
//! - `builder/` - Filters + Sort + fields → Query
//! - `reconciler/` - Entity + attributes + shared link → initial view
//! - `share/` - Query ↔ shareable link
//! - `table/` - rows → sorted, paged, rendered cells
//! - `client/` - Query → rows via the remote API
//! - `session/` - orchestration of all of the above
//!
//! # Example
//!
//! ```ignore
//! use arronax::{parser, share, Explorer, HttpApi};
//!
//! let config = parser::parse_file("explorer.yaml")?;
//! let mut explorer = Explorer::new(HttpApi::new()?, config);
//! let link = share::parse_link("https://explorer.example.com/?e=blocks&q=eyJm...")?;
//! explorer.init_load(Some(&link)).await?;
//! if let Some(state) = explorer.current() {
//!     let page = state.table.visible_page(&state.items);
//! }
//! ```

pub mod metadata;
pub mod query;
pub mod config;
pub mod parser;
pub mod builder;
pub mod reconciler;
pub mod share;
pub mod table;
pub mod client;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use metadata::{AttributeDefinition, DataType, Entity, EntityDefinition, OperatorType, Aggregation};
pub use query::{Filter, FilterOperator, Query, Row, Sort, SortDirection, SortKey};
pub use config::{ExplorerConfig, NetworkConfig, ServerInfo};
pub use builder::build_main_query;
pub use reconciler::{reconcile_entity, InitCache, InitialView, ReconcileError};
pub use share::{SharedLink, ShareError};
pub use table::{render_cell, Cell, RenderOptions, TableState};
pub use client::{ClientError, ConseilApi, HttpApi};
pub use session::{ErrorKind, Explorer, Message, SessionError};
pub use error::ParseError;
