//! Default/shared query reconciler (verb module)
//!
//! Entity + attributes + optional shared link → initial columns, sort and
//! filters, plus the query to run first.

mod cache;
mod error;
mod reconcile;

pub use cache::InitCache;
pub use error::ReconcileError;
pub use reconcile::{reconcile_entity, InitialView, QuerySource};
