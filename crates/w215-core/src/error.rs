//! Error types for w215-core.
//!
//! Most device faults never reach the caller of [`SmartPlug`](crate::SmartPlug):
//! they are logged and degraded to an absent value. These variants are what
//! the lower layers (transport, codec, handshake) report to the client.

use thiserror::Error;

/// Error type for w215-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Operation timed out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Device answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Login handshake was rejected or incomplete.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Protocol error (unexpected response shape, missing element, etc.).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Failed to parse device response.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Caller supplied a value the device cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(String),
}

impl Error {
    /// Returns `true` for faults worth re-authenticating and retrying.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::ConnectionFailed(_) | Error::Timeout(_) | Error::HttpStatus(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            Error::HttpStatus(status.as_u16())
        } else if err.is_builder() {
            Error::Http(err.to_string())
        } else {
            Error::ConnectionFailed(err.to_string())
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}
