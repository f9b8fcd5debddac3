//! API client error types

use thiserror::Error;

/// Errors that can occur when talking to the statistics API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS or transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured request timeout elapsed
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Server answered with a non-2xx status
    #[error("API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Body was not the JSON shape we expect
    #[error("Malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Client could not be constructed from the given settings
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the request itself failed (transport, timeout, non-2xx),
    /// as opposed to a bad payload
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Request(_) | ApiError::Timeout { .. } | ApiError::Status { .. }
        )
    }

    /// Whether the server answered but the body could not be decoded
    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::Malformed { .. })
    }
}
