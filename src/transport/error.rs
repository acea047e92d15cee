//! Error types for the transport module.
//!
//! Transport errors describe why a single HTTP exchange could not produce a
//! response. They never encode a liveness verdict; interpreting a response is
//! the job of the provider checkers.

use thiserror::Error;

/// Errors that can occur while issuing a transport request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The HTTP verb is not one of the supported methods.
    #[error("invalid method type '{method}'")]
    InvalidMethod {
        /// The rejected method name, upper-cased.
        method: String,
    },

    /// The request URL could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The malformed URL.
        url: String,
    },

    /// Network-level failure (DNS, connection refused, TLS handshake, reset).
    #[error("network error requesting {url}: {reason}")]
    Network {
        /// The URL being requested.
        url: String,
        /// Rendered underlying error.
        reason: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL being requested.
        url: String,
    },

    /// The payload could not be serialized as JSON.
    #[error("failed to serialize request payload: {reason}")]
    Serialize {
        /// Rendered serializer error.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild {
        /// Rendered builder error.
        reason: String,
    },
}

impl TransportError {
    /// Creates an `InvalidMethod` error.
    #[must_use]
    pub fn invalid_method(method: &str) -> Self {
        Self::InvalidMethod {
            method: method.to_ascii_uppercase(),
        }
    }

    /// Classifies a reqwest failure for `url` into a transport error.
    #[must_use]
    pub fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }

    /// Returns true if the failure happened on the wire rather than in request
    /// construction.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}
