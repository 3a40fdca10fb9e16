use std::fmt;

/// Errors that can occur while encoding or decoding a shared query
#[derive(Debug)]
pub enum ShareError {
    /// The `q` parameter is not valid base64url
    Base64(base64::DecodeError),
    /// The decoded payload is not a query
    Json(serde_json::Error),
    /// The link itself could not be parsed
    InvalidLink(String),
    /// A required link parameter is absent
    MissingParameter(&'static str),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Base64(e) => write!(f, "Shared query is not valid base64url: {}", e),
            ShareError::Json(e) => write!(f, "Shared query is not a valid query: {}", e),
            ShareError::InvalidLink(link) => write!(f, "Invalid share link '{}'", link),
            ShareError::MissingParameter(name) => {
                write!(f, "Share link is missing the '{}' parameter", name)
            }
        }
    }
}

impl std::error::Error for ShareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShareError::Base64(e) => Some(e),
            ShareError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<base64::DecodeError> for ShareError {
    fn from(err: base64::DecodeError) -> Self {
        ShareError::Base64(err)
    }
}

impl From<serde_json::Error> for ShareError {
    fn from(err: serde_json::Error) -> Self {
        ShareError::Json(err)
    }
}
