//! Error types for the query API client

use std::fmt;

/// Errors talking to the metadata/data API
#[derive(Debug)]
pub enum ClientError {
    /// Request could not be sent or the response not read
    Transport {
        url: String,
        source: reqwest::Error,
    },
    /// The API answered with a non-success status
    Status {
        url: String,
        status: u16,
        body: String,
    },
    /// Response body was not the expected JSON
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn url(&self) -> &str {
        match self {
            ClientError::Transport { url, .. }
            | ClientError::Status { url, .. }
            | ClientError::Decode { url, .. } => url,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport { url, source } => {
                write!(f, "Request to '{}' failed: {}", url, source)
            }
            ClientError::Status { url, status, body } => {
                write!(f, "Request to '{}' returned status {}", url, status)?;
                if !body.is_empty() {
                    write!(f, ": {}", body)?;
                }
                Ok(())
            }
            ClientError::Decode { url, source } => {
                write!(f, "Unexpected response from '{}': {}", url, source)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport { source, .. } => Some(source),
            ClientError::Status { .. } => None,
            ClientError::Decode { source, .. } => Some(source),
        }
    }
}
