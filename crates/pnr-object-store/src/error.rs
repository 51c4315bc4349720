//! Object store client error types.

/// Errors from object store calls.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    /// HTTP transport error, including client-side timeouts.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The object store returned a non-2xx status.
    #[error("object store {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ObjectStoreError {
    /// True if the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}
