//! Feed error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type covering every failure mode of the live feed.
///
/// # Examples
///
/// ```
/// use coingas_core::error::FeedError;
///
/// let error = FeedError::ConnectionFailed {
///     reason: "Connection refused".to_string(),
/// };
/// assert!(error.to_string().contains("Connection refused"));
/// assert!(error.is_recoverable());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedError {
    /// A connection attempt failed before the session opened.
    #[error("[Feed] Connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for the connection failure.
        reason: String,
    },

    /// A connection attempt did not complete within the allowed time.
    #[error("[Feed] Connection timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// An open session was closed by the server or by a transport error.
    #[error("[Feed] Connection closed: {reason}")]
    ConnectionClosed {
        /// Reason for the closure.
        reason: String,
    },

    /// An inbound frame could not be decoded as gas-fee data.
    ///
    /// The session stays open; only the offending frame is dropped.
    #[error("[Feed] Failed to decode gas data: {reason}")]
    Decode {
        /// Parse failure description.
        reason: String,
    },

    /// The endpoint could not be turned into a transport at all
    /// (e.g., malformed URL). No retry is scheduled for this case.
    #[error("[Feed] Invalid feed endpoint: {reason}")]
    Construction {
        /// Reason the transport could not be constructed.
        reason: String,
    },

    /// All reconnect attempts were spent without re-establishing a session.
    ///
    /// Reported exactly once; a new `connect` call is required to resume.
    #[error("[Feed] Failed to establish connection after {attempts} attempts")]
    RetriesExhausted {
        /// Number of consecutive failed attempts.
        attempts: u32,
    },
}

impl FeedError {
    /// Returns true if this error is recoverable (the client keeps going).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout { .. }
                | Self::ConnectionClosed { .. }
                | Self::Decode { .. }
        )
    }

    /// Returns true if this error ends the current session for good.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Construction { .. } | Self::RetriesExhausted { .. }
        )
    }

    /// Returns true if the error concerns a single message rather than the
    /// connection itself.
    #[must_use]
    pub fn is_message_level(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed() {
        let error = FeedError::ConnectionFailed {
            reason: "Connection refused".to_string(),
        };
        assert!(error.to_string().contains("Connection refused"));
        assert!(error.is_recoverable());
        assert!(!error.is_terminal());
    }

    #[test]
    fn test_timeout() {
        let error = FeedError::Timeout { timeout_ms: 10_000 };
        assert!(error.to_string().contains("10000ms"));
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_decode_is_message_level() {
        let error = FeedError::Decode {
            reason: "expected value at line 1".to_string(),
        };
        assert!(error.is_recoverable());
        assert!(error.is_message_level());
        assert!(!error.is_terminal());
    }

    #[test]
    fn test_terminal_errors() {
        let exhausted = FeedError::RetriesExhausted { attempts: 5 };
        assert!(exhausted.to_string().contains("5 attempts"));
        assert!(exhausted.is_terminal());
        assert!(!exhausted.is_recoverable());

        let construction = FeedError::Construction {
            reason: "relative URL without a base".to_string(),
        };
        assert!(construction.is_terminal());
        assert!(!construction.is_recoverable());
    }

    #[test]
    fn test_serde_roundtrip() {
        let error = FeedError::RetriesExhausted { attempts: 5 };
        let json = serde_json::to_string(&error).unwrap();
        let parsed: FeedError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, parsed);
    }
}
