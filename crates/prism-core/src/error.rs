//! Error types for prism.
//!
//! A single error type with explicit variants for transport, authentication,
//! renewal, protocol, input validation and storage failures.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// The unified error type for prism operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, invalid session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The login performed to renew an invalid session failed.
    ///
    /// The inner error is shared by every request that waited on the same
    /// renewal attempt.
    #[error("session renewal failed: {0}")]
    Renewal(#[source] Arc<Error>),

    /// Unexpected HTTP responses from the server.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (malformed URLs, identifiers).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Persistence errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if this error means the session is (still) unauthorized.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Protocol(err) => err.is_auth_error(),
            Error::Renewal(inner) => inner.is_auth_error(),
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// TLS/SSL error, including unusable client certificates.
    #[error("TLS error: {message}")]
    Tls { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the credentials.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Unexpected HTTP status from the server.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if any.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid server URL.
    #[error("invalid server URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid session identifier.
    #[error("invalid session id: {reason}")]
    SessionId { reason: String },
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored data could not be encoded or decoded.
    #[error("malformed stored data: {message}")]
    Format { message: String },
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Format {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_protocol_error_is_auth_error() {
        let err = Error::Protocol(ProtocolError::new(401, None));
        assert!(err.is_auth_error());
        assert_eq!(err.to_string(), "protocol error: HTTP 401");
    }

    #[test]
    fn renewal_error_exposes_source() {
        let inner = Arc::new(Error::Auth(AuthError::InvalidCredentials(
            "wrong password".to_string(),
        )));
        let err = Error::Renewal(inner);
        assert!(err.is_auth_error());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn transport_error_is_not_auth_error() {
        let err = Error::Transport(TransportError::Timeout);
        assert!(!err.is_auth_error());
    }
}
