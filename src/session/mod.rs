//! Explorer session (verb module)
//!
//! Holds per-network, per-entity explorer state and drives the query API:
//! initial load, tab and network switches, query submission, CSV export,
//! share links and single-record lookups.

mod attributes;
mod error;
mod explorer;
mod state;

pub use attributes::AttributeCache;
pub use error::{ErrorKind, SessionError};
pub use explorer::Explorer;
pub use state::{EntityState, Message};
