//! Error types for explorer session operations

use std::fmt;
use crate::client::ClientError;
use crate::reconciler::ReconcileError;
use crate::share::ShareError;

/// Category shown with a user-visible failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API could not be reached or refused the request
    Network,
    /// Input or state does not fit the metadata
    Validation,
    /// A payload could not be decoded
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Errors that can occur during session operations
#[derive(Debug)]
pub enum SessionError {
    Client(ClientError),
    Reconcile(ReconcileError),
    Share(ShareError),
    /// Network name missing from the config
    UnknownNetwork(String),
    /// Entity not reported by the current network
    UnknownEntity(String),
    /// Operation needs a selected entity
    NoEntitySelected,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Client(ClientError::Decode { .. }) => ErrorKind::Decode,
            SessionError::Client(_) => ErrorKind::Network,
            SessionError::Reconcile(ReconcileError::Decode(_)) => ErrorKind::Decode,
            SessionError::Reconcile(_) => ErrorKind::Validation,
            SessionError::Share(ShareError::InvalidLink(_))
            | SessionError::Share(ShareError::MissingParameter(_)) => ErrorKind::Validation,
            SessionError::Share(_) => ErrorKind::Decode,
            SessionError::UnknownNetwork(_)
            | SessionError::UnknownEntity(_)
            | SessionError::NoEntitySelected => ErrorKind::Validation,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Client(e) => write!(f, "{}", e),
            SessionError::Reconcile(e) => write!(f, "{}", e),
            SessionError::Share(e) => write!(f, "{}", e),
            SessionError::UnknownNetwork(name) => write!(f, "Network '{}' is not configured", name),
            SessionError::UnknownEntity(name) => write!(f, "Entity '{}' is not available on this network", name),
            SessionError::NoEntitySelected => write!(f, "No entity selected"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Client(e) => Some(e),
            SessionError::Reconcile(e) => Some(e),
            SessionError::Share(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        SessionError::Client(err)
    }
}

impl From<ReconcileError> for SessionError {
    fn from(err: ReconcileError) -> Self {
        SessionError::Reconcile(err)
    }
}

impl From<ShareError> for SessionError {
    fn from(err: ShareError) -> Self {
        SessionError::Share(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SessionError::UnknownNetwork("x".into()).kind(), ErrorKind::Validation);
        let status = ClientError::Status {
            url: "u".into(),
            status: 500,
            body: String::new(),
        };
        assert_eq!(SessionError::from(status).kind(), ErrorKind::Network);

        let bad_base64 = crate::share::decode_query("!!!").unwrap_err();
        assert_eq!(SessionError::from(bad_base64).kind(), ErrorKind::Decode);

        let unknown = ReconcileError::UnknownAttribute {
            entity: "blocks".into(),
            attribute: "nope".into(),
        };
        assert_eq!(SessionError::from(unknown).kind(), ErrorKind::Validation);
    }
}
