use std::fmt;
use crate::share::ShareError;

/// Errors that can occur while deriving an entity's initial view
#[derive(Debug)]
pub enum ReconcileError {
    /// A predicate names an attribute the entity no longer has
    UnknownAttribute { entity: String, attribute: String },
    /// The entity has no attributes to build columns from
    NoAttributes(String),
    /// The shared query could not be decoded
    Decode(ShareError),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::UnknownAttribute { entity, attribute } => {
                write!(f, "Attribute '{}' not found on entity '{}'", attribute, entity)
            }
            ReconcileError::NoAttributes(entity) => {
                write!(f, "Entity '{}' has no attributes", entity)
            }
            ReconcileError::Decode(e) => write!(f, "Could not read shared query: {}", e),
        }
    }
}

impl std::error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconcileError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShareError> for ReconcileError {
    fn from(err: ShareError) -> Self {
        ReconcileError::Decode(err)
    }
}
