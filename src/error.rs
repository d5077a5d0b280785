//! Error handling for the NGSI agent

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure (connection refused, DNS, timeout),
    /// passed through from the HTTP gateway unchanged
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Broker reachable but rejected a registration resync
    #[error("Registration error: {0}")]
    Registration(String),

    /// Broker reachable but rejected an unregistration resync
    #[error("Unregistration error: {0}")]
    Unregistration(String),

    /// Status and body disagree (non-200, or 200 with a missing or
    /// malformed body)
    #[error("Unknown response from context broker: {0}")]
    UnknownResponse(String),

    /// Protocol operation issued before a successful activation
    #[error("Agent not activated")]
    NotActivated,

    /// Validation error (missing or malformed configuration)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
