//! Error types for the ClubHub client

use thiserror::Error;

/// Error type for ClubHub API operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, connect, reset, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error: {status_code} - {body}")]
    Api { status_code: u16, body: String },

    /// Response body was not the JSON we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The token contains bytes that cannot travel in a header
    #[error("bearer token cannot be sent as a header value")]
    InvalidToken,
}

impl Error {
    /// Returns true if the transport failed before any response arrived
    pub fn is_network_error(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// Returns true if this is an authentication error (401)
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Error::Api { status_code: 401, .. })
    }

    /// Returns true if this is a not found error (404)
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, Error::Api { status_code: 404, .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
