//! Typed errors for configuration and the remote task system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure talking to the remote task system.
///
/// Serializable so that recorded cassettes keep the failure kind intact
/// when a session is replayed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteError {
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The remote answered with a status other than the one the call expects.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code returned by the remote.
        status: u16,
        /// Response body, kept verbatim for diagnostics.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Invalid or incomplete configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending raw value.
        value: String,
    },
}
