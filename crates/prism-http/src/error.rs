//! Mapping of HTTP library errors onto prism errors.

use prism_core::error::{Error, TransportError};

pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

pub(crate) fn tls(message: impl Into<String>) -> Error {
    Error::Transport(TransportError::Tls {
        message: message.into(),
    })
}
