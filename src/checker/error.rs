//! Error types for link checking.
//!
//! A link that is valid but whose resource is gone is reported as
//! [`LinkStatus::Offline`](super::LinkStatus::Offline), never as an error.
//! The variants here cover malformed input and probes that could not reach a
//! verdict.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can occur while validating or probing a link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The link does not match the grammar of the checker it was given to.
    #[error("the link '{link}' is not valid")]
    InvalidLink {
        /// The rejected link.
        link: String,
    },

    /// The provider could not be reached or answered with nothing.
    #[error("connection failed while probing '{link}': {reason}\n  Suggestion: Check network access and retry later")]
    ConnectionFailed {
        /// The link being probed.
        link: String,
        /// What went wrong on the wire.
        reason: String,
    },

    /// The provider answered with a status that carries no liveness verdict.
    #[error("unexpected HTTP {status} while probing '{link}'")]
    UnexpectedStatus {
        /// The link being probed.
        link: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The request could not be issued at all.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CheckError {
    /// Creates an `InvalidLink` error.
    #[must_use]
    pub fn invalid_link(link: &str) -> Self {
        Self::InvalidLink {
            link: link.to_string(),
        }
    }

    /// Creates a `ConnectionFailed` error.
    #[must_use]
    pub fn connection_failed(link: &str, reason: &str) -> Self {
        Self::ConnectionFailed {
            link: link.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Maps a transport failure raised while probing `link`.
    ///
    /// Wire failures become `ConnectionFailed`; everything else is a request
    /// construction problem and is kept as `Transport`.
    #[must_use]
    pub fn from_transport(link: &str, error: TransportError) -> Self {
        if error.is_connection_failure() {
            Self::connection_failed(link, &error.to_string())
        } else {
            Self::Transport(error)
        }
    }

    /// Returns true for failures a caller may reasonably retry later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::UnexpectedStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_link_message() {
        let err = CheckError::invalid_link("https://mega.nz/fil/abc");
        assert_eq!(
            err.to_string(),
            "the link 'https://mega.nz/fil/abc' is not valid"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_connection_failed_message_has_suggestion() {
        let err = CheckError::connection_failed("https://mega.nz/file/abcdefgh", "empty body");
        let msg = err.to_string();
        assert!(msg.contains("abcdefgh"));
        assert!(msg.contains("empty body"));
        assert!(msg.contains("Suggestion"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_from_transport_maps_wire_failures_to_connection_failed() {
        let err = CheckError::from_transport(
            "https://mega.nz/file/abcdefgh",
            TransportError::Timeout {
                url: "https://g.api.mega.co.nz/cs".to_string(),
            },
        );
        assert!(matches!(err, CheckError::ConnectionFailed { .. }));
    }

    #[test]
    fn test_from_transport_keeps_construction_failures() {
        let err = CheckError::from_transport(
            "https://mega.nz/file/abcdefgh",
            TransportError::invalid_method("TRACE"),
        );
        assert_eq!(
            err,
            CheckError::Transport(TransportError::invalid_method("TRACE"))
        );
        assert!(!err.is_retryable());
    }
}
